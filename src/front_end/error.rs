use super::PatternRule;

pub type Result<T> = std::result::Result<T, pest::error::Error<PatternRule>>;
