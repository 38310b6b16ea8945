//! # libsedml
//!
//! A pure Rust object model and XML binding for SED-ML, the Simulation
//! Experiment Description Markup Language.
//!
//! A SED-ML document describes which models to load, which changes to apply
//! to them, which simulations to run, which tasks bind the two together and
//! which outputs to produce from the results. This crate reads such
//! documents into an owned tree of typed nodes, lets callers edit that tree
//! and writes it back out.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Reading never aborts on document problems: every issue is recorded in
//!   the document's [`ErrorLog`] with its source position
//! - Levels 1 Version 1 through 5, with alternate namespace URIs accepted on
//!   read and the canonical one written back
//! - Typed add operations that check required attributes, level, version and
//!   namespaces before adopting an object
//! - Renaming support that rewrites every identifier reference in a subtree
//!
//! ## Example
//!
//! ```
//! use libsedml::{SedBase, SedDocument, write_sedml_to_string};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = SedDocument::new(1, 3);
//! let model = doc.create_model();
//! model.set_id("model1")?;
//! model.set_language("urn:sedml:language:sbml")?;
//! model.set_source("model.xml")?;
//!
//! let xml = write_sedml_to_string(&doc)?;
//! assert!(xml.contains(r#"<model id="model1""#));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod capi;
pub mod diagnostics;
pub mod error;
pub mod kisao;
pub mod model;
pub mod namespaces;
pub mod node;
pub mod parser;
pub mod syntax;
pub mod type_codes;
pub mod writer;
pub mod xml;

pub use diagnostics::{ErrorLog, SedError, SedErrorCode, Severity};
pub use error::{Error, OperationError, OperationResult, Result};
pub use model::{
    Algorithm, AlgorithmParameter, Change, ChangeAttribute, Curve, DataGenerator, DataSet,
    OneStep, Output, Parameter, Plot2D, RemoveXml, Report, SedDocument, SedModel, Simulation,
    SteadyState, Task, UniformTimeCourse, Variable,
};
pub use node::{ListItem, ListOf, SedBase};
pub use parser::{ReaderConfig, SedReader, read_sedml_from_file, read_sedml_from_string};
pub use type_codes::TypeCode;
pub use writer::{SedWriter, WriterConfig, write_sedml_to_file, write_sedml_to_string};
