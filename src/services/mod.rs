pub mod comparator;
pub mod extractor;
pub mod scratch;
pub mod usernames;
