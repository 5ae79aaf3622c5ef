// This file is the module declaration file for the `builders` module.
// It declares and makes public the building blocks that sit on top of the
// engine: validators, concrete configuration models and report rendering.

// `validator` module:
// The `Validator` enum: built-in checks (`NotEmpty`, `IsString`, `IsBool`,
// `OneOf`, `Matches`) and `Custom` for closures supplied by the caller.
pub mod validator;

// `typescript` module:
// `TypescriptConfig`, the settings of a TypeScript compile run, together with
// the rule set that governs them.
pub mod typescript;

// `webpack` module:
// `WebpackConfig`, the settings for bundling an extension, and its rules.
pub mod webpack;

// `reporter` module:
// Turns a `SetOptionsReport` into console text or JSON for the user.
pub mod reporter;
