use uuid::Uuid;

/// Time-ordered identifier for new rows, so ordering by id follows creation order.
pub fn new_id() -> Uuid {
    Uuid::now_v7()
}

/// Parses a caller-supplied identifier. The nil UUID is never a valid row id.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok().filter(|id| !id.is_nil())
}
