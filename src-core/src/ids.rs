use uuid::Uuid;

/// Generates a prefixed entity id, e.g. `quot_9f8b2c…`.
///
/// Every persisted row carries one of these instead of a bare UUID so ids
/// stay recognizable in logs and API payloads.
pub fn generate_entity_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_carries_prefix() {
        let id = generate_entity_id("quot");
        assert!(id.starts_with("quot_"));
        assert_eq!(id.len(), "quot_".len() + 32);
    }

    #[test]
    fn ids_are_unique() {
        let a = generate_entity_id("usr");
        let b = generate_entity_id("usr");
        assert_ne!(a, b);
    }
}
