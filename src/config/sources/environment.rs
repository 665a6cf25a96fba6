//! Environment source: `FOLDCMP_SECTION__KEY=value`

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const PREFIX: &str = "FOLDCMP";

/// Add environment overrides, e.g. `FOLDCMP_VIEW__SHOW_UNCHANGED=true`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("diff.ignore_patterns"),
    )
}
