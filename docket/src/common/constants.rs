// document field constants
pub const DOC_ID: &str = "Id";
pub const DOC_CREATED_DATE: &str = "CreatedDate";
pub const DOC_MODIFIED_DATE: &str = "ModifiedDate";
pub const DOC_META: &str = "Meta";

// sequence constants
pub const SEQUENCE_COLLECTION: &str = "Sequences";
pub const SEQUENCE_DOC_ID: &str = "sequences";

// relation constants
pub const COMPOSITE_KEY_SEPARATOR: &str = "-";

// index constants
pub const INDEX_NAME_SEPARATOR: &str = "_";

// find constants
pub const DEFAULT_FIND_CEILING: u64 = 10_000;
