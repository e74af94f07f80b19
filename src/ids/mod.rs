use uuid::Uuid;

/// Source of the opaque `requestId` / `extendedRequestId` values. Two calls must return
/// different values; no ordering is expected.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random UUID v4 ids, the format the gateway itself uses for request ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_ids_are_distinct_uuids() {
        let generator = UuidGenerator;

        let first = generator.next_id();
        let second = generator.next_id();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }
}
