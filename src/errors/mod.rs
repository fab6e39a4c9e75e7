use anyhow::Context as _;

/// Add context to storage errors
pub fn storage_context(operation: &str, target: &str) -> String {
    format!("Failed to {} in: {}", operation, target)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to model build errors
pub fn build_context(stage: &str) -> String {
    format!("Failed to build bias model: {}", stage)
}

/// Wrap result with storage context
pub fn with_storage_context<T, E>(result: Result<T, E>, operation: &str, target: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.with_context(|| storage_context(operation, target))
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}
