use chrono::Utc;
use uuid::Uuid;

/// `<prefix>-<unix millis>-<9 hex chars>`, e.g. `waste-1718000000000-3fa85f642`.
pub fn generate_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), &suffix[..9])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_prefix_and_differ() {
        let first = generate_id("conf");
        let second = generate_id("conf");

        assert!(first.starts_with("conf-"));
        assert_eq!(first.split('-').count(), 3);
        assert_ne!(first, second);
    }
}
