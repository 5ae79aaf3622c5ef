//! Rule-driven option validation.
//!
//! An [`OptionEngine`](crate::core::engine::OptionEngine) holds a fixed
//! [`OptionRuleSet`](crate::core::option::OptionRuleSet) and a configuration model.
//! Each call to `set_options` drops unknown keys, validates the rest and hands
//! the accepted values to the model's setters, returning one
//! [`OptionResult`](crate::core::option::OptionResult) per evaluated option.
pub mod builders;
pub mod core;
pub mod utils;

#[cfg(test)]
mod tests;
