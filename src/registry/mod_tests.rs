//! Tests for the domain registry.

use std::sync::{Arc, Mutex};

use crate::model::{Config, Domain, DomainName, ValidationError};
use crate::store::mock::MockDocumentStore;
use crate::store::{ConfigStore, StoreError};

use super::{DomainRegistry, DomainView, RegistryError, format_table};

/// View that records every list it was asked to draw.
#[derive(Debug, Default)]
struct RecordingView {
    renders: Mutex<Vec<Vec<Domain>>>,
}

impl RecordingView {
    fn render_count(&self) -> usize {
        self.renders.lock().unwrap().len()
    }

    fn last(&self) -> Option<Vec<Domain>> {
        self.renders.lock().unwrap().last().cloned()
    }
}

impl DomainView for RecordingView {
    fn render(&self, domains: &[Domain]) {
        self.renders.lock().unwrap().push(domains.to_vec());
    }
}

fn domain(name: &str, enabled: bool) -> Domain {
    Domain {
        name: DomainName::new(name).unwrap(),
        enabled,
    }
}

async fn registry_with(
    domains: Vec<Domain>,
) -> DomainRegistry<MockDocumentStore, RecordingView> {
    let config = Config {
        domains,
        ..Config::default()
    };
    let store = Arc::new(ConfigStore::new(MockDocumentStore::with_loaded(config)));
    store.load().await.unwrap();
    DomainRegistry::new(store, RecordingView::default())
}

fn names(domains: &[Domain]) -> Vec<&str> {
    domains.iter().map(|d| d.name.as_str()).collect()
}

mod add {
    use super::*;

    #[tokio::test]
    async fn appends_enabled_domain_and_persists() {
        let registry = registry_with(vec![domain("first", false)]).await;

        let added = registry.add("abc-123").await.unwrap();

        assert_eq!(added, domain("abc-123", true));
        let saved = registry.store.backend().last_saved().unwrap();
        assert_eq!(saved.domains, vec![domain("first", false), domain("abc-123", true)]);
    }

    #[tokio::test]
    async fn trims_input() {
        let registry = registry_with(vec![]).await;

        let added = registry.add("  home  ").await.unwrap();

        assert_eq!(added.name, "home");
    }

    #[tokio::test]
    async fn duplicate_is_rejected_and_leaves_one_entry() {
        let registry = registry_with(vec![]).await;
        registry.add("home").await.unwrap();

        let result = registry.add("home").await;

        assert!(matches!(
            result,
            Err(RegistryError::Validation(ValidationError::DuplicateName(ref n))) if n == "home"
        ));
        assert_eq!(names(&registry.list().await.unwrap()), vec!["home"]);
        assert_eq!(registry.store.backend().save_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_check_is_case_sensitive() {
        let registry = registry_with(vec![domain("Home", true)]).await;

        registry.add("home").await.unwrap();

        assert_eq!(names(&registry.list().await.unwrap()), vec!["Home", "home"]);
    }

    #[tokio::test]
    async fn empty_name_is_rejected_without_mutation() {
        let registry = registry_with(vec![domain("keep", true)]).await;

        let result = registry.add("").await;

        assert!(matches!(
            result,
            Err(RegistryError::Validation(ValidationError::EmptyName))
        ));
        assert_eq!(names(&registry.list().await.unwrap()), vec!["keep"]);
        assert_eq!(registry.store.backend().save_count(), 0);
        assert_eq!(registry.view().render_count(), 0);
    }

    #[tokio::test]
    async fn name_with_space_is_rejected_without_mutation() {
        let registry = registry_with(vec![domain("keep", true)]).await;

        let result = registry.add("a b").await;

        assert!(matches!(
            result,
            Err(RegistryError::Validation(ValidationError::InvalidCharacters(_)))
        ));
        assert_eq!(names(&registry.list().await.unwrap()), vec!["keep"]);
        assert_eq!(registry.store.backend().save_count(), 0);
    }

    #[tokio::test]
    async fn refreshes_view_with_new_list() {
        let registry = registry_with(vec![domain("a", true)]).await;

        registry.add("b").await.unwrap();

        assert_eq!(
            registry.view().last(),
            Some(vec![domain("a", true), domain("b", true)])
        );
    }

    #[tokio::test]
    async fn failed_write_reports_store_error_and_keeps_list() {
        let registry = registry_with(vec![]).await;
        registry.store.backend().fail_writes();

        let result = registry.add("home").await;

        assert!(matches!(result, Err(RegistryError::Store(StoreError::Write(_)))));
        assert!(registry.list().await.unwrap().is_empty());
        assert_eq!(registry.view().render_count(), 0);
    }
}

mod remove {
    use super::*;

    #[tokio::test]
    async fn removes_exactly_one_and_keeps_order() {
        let registry =
            registry_with(vec![domain("a", true), domain("b", false), domain("c", true)]).await;

        let removed = registry.remove("b").await.unwrap();

        assert_eq!(removed, domain("b", false));
        let saved = registry.store.backend().last_saved().unwrap();
        assert_eq!(names(&saved.domains), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn second_remove_is_not_found() {
        let registry = registry_with(vec![domain("a", true), domain("b", true)]).await;

        registry.remove("a").await.unwrap();
        let result = registry.remove("a").await;

        assert!(matches!(result, Err(RegistryError::NotFound { ref name }) if name == "a"));
        assert_eq!(names(&registry.list().await.unwrap()), vec!["b"]);
    }

    #[tokio::test]
    async fn refreshes_view() {
        let registry = registry_with(vec![domain("a", true)]).await;

        registry.remove("a").await.unwrap();

        assert_eq!(registry.view().last(), Some(vec![]));
    }

    #[tokio::test]
    async fn padded_name_matches_trimmed_entry() {
        let registry = registry_with(vec![]).await;
        registry.add("  abc-123 ").await.unwrap();

        let removed = registry.remove(" abc-123").await.unwrap();

        assert_eq!(removed.name, "abc-123");
        assert!(registry.list().await.unwrap().is_empty());
    }
}

mod toggle {
    use super::*;

    #[tokio::test]
    async fn sets_flag_and_persists() {
        let registry = registry_with(vec![domain("a", true), domain("b", true)]).await;

        registry.toggle("b", false).await.unwrap();

        let saved = registry.store.backend().last_saved().unwrap();
        assert_eq!(saved.domains, vec![domain("a", true), domain("b", false)]);
    }

    #[tokio::test]
    async fn unchanged_value_still_persists() {
        let registry = registry_with(vec![domain("a", true)]).await;

        registry.toggle("a", true).await.unwrap();

        assert_eq!(registry.store.backend().save_count(), 1);
        assert_eq!(registry.view().render_count(), 1);
    }

    #[tokio::test]
    async fn missing_name_is_not_found() {
        let registry = registry_with(vec![domain("a", true)]).await;

        let result = registry.toggle("zzz", false).await;

        assert!(matches!(result, Err(RegistryError::NotFound { .. })));
        assert_eq!(registry.store.backend().save_count(), 0);
    }

    #[tokio::test]
    async fn padded_name_matches_trimmed_entry() {
        let registry = registry_with(vec![domain("home", true)]).await;

        let toggled = registry.toggle("home\t", false).await.unwrap();

        assert_eq!(toggled, domain("home", false));
    }
}

mod ordering {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_changes_render_in_commit_order() {
        let registry = Arc::new(registry_with(vec![]).await);

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move { registry.add(&format!("d{i}")).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let renders = registry.view().renders.lock().unwrap().clone();
        assert_eq!(renders.len(), 16);
        for (i, list) in renders.iter().enumerate() {
            assert_eq!(list.len(), i + 1);
        }
        assert_eq!(renders.last(), Some(&registry.list().await.unwrap()));
    }
}

mod errors {
    use super::*;

    #[test]
    fn validation_and_not_found_are_user_facing() {
        assert!(RegistryError::from(ValidationError::EmptyName).is_user_facing());
        assert!(
            RegistryError::NotFound {
                name: "x".to_string()
            }
            .is_user_facing()
        );
        assert!(!RegistryError::from(StoreError::NotLoaded).is_user_facing());
    }

    #[test]
    fn not_found_message_names_domain() {
        let error = RegistryError::NotFound {
            name: "home".to_string(),
        };
        assert_eq!(error.to_string(), "Domain 'home' not found");
    }
}

mod table {
    use super::*;

    #[test]
    fn empty_list_has_placeholder() {
        assert_eq!(format_table(&[]), "(no domains)\n");
    }

    #[test]
    fn rows_follow_list_order_with_suffix() {
        let table = format_table(&[domain("zeta", true), domain("alpha", false)]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("name"));
        assert!(lines[1].starts_with("zeta.duckdns.org"));
        assert!(lines[1].ends_with("[x]"));
        assert!(lines[2].starts_with("alpha.duckdns.org"));
        assert!(lines[2].ends_with("[ ]"));
    }
}
