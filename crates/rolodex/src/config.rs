//! Configuration for a synchronization run.

/// Options controlling naming and emission.
///
/// Passed explicitly into [`build_model`](crate::build_model),
/// [`plan`](crate::plan) and [`apply`](crate::apply); the defaults match
/// what most deployments want.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Width of the generated `Name` column. Adjust to suit your data if
    /// required, defaults to 255.
    pub name_field_length: u16,

    /// Prefix added to every generated table name so lookup tables group
    /// together and stand out from ordinary tables. Defaults to `"Enum_"`;
    /// set to `""` for no prefix.
    pub table_name_prefix: String,

    /// Suffix added to every generated table name. Defaults to `""`.
    pub table_name_suffix: String,

    /// When true (default), PascalCase member identifiers are stored with
    /// spaces between words, e.g. `SomeValue` becomes `"Some Value"`.
    pub split_words: bool,

    /// When true (default), row values travel as bound parameters. Turn
    /// off for execution paths that cannot carry bindings; values are then
    /// inlined as escaped literals. Both modes produce identical tables.
    pub parameterized: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            name_field_length: 255,
            table_name_prefix: "Enum_".to_string(),
            table_name_suffix: String::new(),
            split_words: true,
            parameterized: true,
        }
    }
}
