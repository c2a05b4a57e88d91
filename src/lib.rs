//! Immutable, self-validating configuration for project installers. Hand it
//! loosely typed settings, get back a frozen map of canonical values.
//!
//! ```ignore
//! let config = Config::builder()
//!     .registry(my_step_registry)
//!     .toml_str(&std::fs::read_to_string("installer.toml")?)
//!     .build()?;
//!
//! if config["gitignore"].is_ask() {
//!     // prompt the user
//! }
//! ```
//!
//! # Why
//!
//! Installer settings come from hand-written files. Booleans show up as
//! `"yes"`, `"On"` or `1`; paths mix slash styles; a user who wants to be
//! prompted may write `ask`, `prompt` or `query`. Every step that reads a
//! setting would otherwise re-implement that leniency, and each would do it a
//! little differently.
//!
//! This crate does the normalizing once, at construction, against a fixed
//! catalogue of known settings ([`Setting`]). After that the [`Config`] is read
//! only: steps look values up by name and get one canonical shape per setting.
//!
//! # The catalogue
//!
//! | Setting | Accepts | Default |
//! |---------|---------|---------|
//! | `gitignore`, `env-example` | boolean-alike, ask-alias, or URL | `true` |
//! | `env-file` | path | `".env"` |
//! | `move-content` | boolean-alike, forced off while `register-theme-folder` resolves to `true` | `false` |
//! | `content-dev-op` | `symlink`, `copy`, `none` (and aliases), or ask-alias | `"symlink"` |
//! | `content-dev-dir` | path | `"content-dev"` |
//! | `register-theme-folder` | boolean-alike | `true` |
//! | `prevent-overwrite`, `dropins` | list of paths | `[".gitignore"]`, `[]` |
//! | `unknown-dropins` | boolean-alike or ask-alias | `"ask"` |
//! | `verbosity` | `0`, `1`, `2` | — |
//! | `gitignore-rules` | `{ wp, wp-content, vendor, common, custom }` | — |
//! | `custom-steps` | list of step type identifiers | — |
//! | `scripts` | `pre-*` / `post-*` hook → callback(s) | — |
//!
//! Boolean-alikes are `true`/`false`, `1`/`0`, and the strings `"1"`,
//! `"true"`, `"yes"`, `"on"` (and their negatives), in any case. Ask-aliases
//! (`ask`, `prompt`, `query`, `interrogate`, `demand`) all become `"ask"`.
//!
//! # Invalid input is quiet
//!
//! A value that fails its rule never produces an error. The key falls back to
//! its default, or is left out when it has none, and a `tracing` warning is
//! emitted. Keys outside the catalogue are ignored. The only build errors are
//! sources that do not parse.
//!
//! # Misuse is loud
//!
//! [`Config::set`] and [`Config::remove`] always fail with
//! [`ConfigError::Immutable`]. The one way to add a key after construction is
//! the extension path:
//!
//! - [`Config::append`] adds a catalogue setting that is still absent, using
//!   the catalogue's rule.
//! - [`Config::append_with`] adds any absent key with a caller-supplied
//!   validator.
//!
//! Both fail with [`ConfigError::Frozen`] if the key is already present;
//! `append` fails with [`ConfigError::ValidatorRequired`] for keys outside the
//! catalogue. A validator that rejects the value leaves the config unchanged
//! and returns `Ok(false)`.
//!
//! # Step and script identifiers
//!
//! `custom-steps` and `scripts` name things the installer owns. The container
//! asks a [`TypeRegistry`] whether an identifier is a concrete step type or a
//! callable; [`StaticRegistry`] is a ready-made in-memory implementation.
//! Without a registry every step and script is filtered out.
//!
//! # Layering
//!
//! [`ConfigBuilder`] accepts several sources (raw maps, TOML, JSON) in
//! priority-ascending order and deep-merges them before validation, so
//! cross-field rules see the merged result.

pub mod error;
pub mod types;

mod builder;
mod coerce;
mod config;
pub(crate) mod merge;
mod ops;
mod registry;
mod resolve;
mod rules;
mod source;
mod value;

#[cfg(test)]
mod fixtures;

pub use builder::ConfigBuilder;
pub use config::{Config, SharedRegistry};
pub use error::ConfigError;
pub use ops::{ConfigResult, generate_template};
pub use registry::{StaticRegistry, TypeKind, TypeRegistry};
pub use rules::Setting;
pub use source::{parse_json, parse_toml};
pub use types::ConfigAction;
pub use value::{ASK, RawInput, RawValue, Value};
