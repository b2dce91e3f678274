/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` (using `#[serde(default = ...)]`
/// for optional settings) and call `Config::from_env()` once at startup.
/// Variable names are the upper-cased field names behind [`Config::PREFIX`].
pub trait Config: Sized + serde::de::DeserializeOwned {
    /// Environment variable prefix, e.g. `"PETMATCH_"`.
    const PREFIX: &'static str;

    fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(Self::PREFIX).from_env()
    }

    /// Load from an explicit set of `(key, value)` pairs (keys include the prefix).
    fn from_iter<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(Self::PREFIX).from_iter(vars)
    }
}
