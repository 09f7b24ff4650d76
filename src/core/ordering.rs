use crate::domain::model::ServiceRecord;
use std::time::Duration;

/// Dispatch order: ascending `position`, ties keep discovery order.
pub fn sort_by_position(services: &[ServiceRecord]) -> Vec<&ServiceRecord> {
    let mut ordered: Vec<&ServiceRecord> = services.iter().collect();
    // sort_by_key is stable
    ordered.sort_by_key(|service| service.position);
    ordered
}

/// A service may extend the global timeout but never shorten it.
pub fn effective_timeout(service_timeout_secs: Option<u64>, global_timeout_secs: u64) -> Duration {
    let secs = service_timeout_secs
        .unwrap_or(0)
        .max(global_timeout_secs);
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(name: &str, position: i64) -> ServiceRecord {
        ServiceRecord::new(name, vec!["true".to_string()]).with_position(position)
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let services = vec![
            service("svc3", 3),
            service("svc1-first", 1),
            service("svc1-second", 1),
            service("svc2", 2),
        ];

        let names: Vec<&str> = sort_by_position(&services)
            .iter()
            .map(|s| s.name.as_str())
            .collect();

        assert_eq!(names, vec!["svc1-first", "svc1-second", "svc2", "svc3"]);
    }

    #[test]
    fn test_sort_handles_negative_and_empty() {
        assert!(sort_by_position(&[]).is_empty());

        let services = vec![service("late", 10), service("early", -5), service("mid", 0)];
        let names: Vec<&str> = sort_by_position(&services)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["early", "mid", "late"]);
    }

    #[test]
    fn test_sort_does_not_reorder_input() {
        let services = vec![service("b", 2), service("a", 1)];
        let _ = sort_by_position(&services);
        assert_eq!(services[0].name, "b");
    }

    #[test]
    fn test_effective_timeout() {
        assert_eq!(effective_timeout(Some(1), 5), Duration::from_secs(5));
        assert_eq!(effective_timeout(Some(10), 5), Duration::from_secs(10));
        assert_eq!(effective_timeout(Some(0), 5), Duration::from_secs(5));
        assert_eq!(effective_timeout(None, 5), Duration::from_secs(5));
    }
}
