//! SED-ML element kinds
//!
//! Each kind is a plain value owning its children. Kinds that share a tag
//! family (changes, simulations, outputs) are closed enums over their
//! concrete variants, so a collection can hold any member of the family and
//! callers match exhaustively instead of down-casting.

/// Implement [`SedBase`](crate::node::SedBase) for a family enum by
/// forwarding every hook to the active variant.
macro_rules! delegate_to_variant {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $ty {
            fn inner(&self) -> &dyn $crate::node::SedBase {
                match self {
                    $( $ty::$variant(x) => x as &dyn $crate::node::SedBase, )+
                }
            }

            fn inner_mut(&mut self) -> &mut dyn $crate::node::SedBase {
                match self {
                    $( $ty::$variant(x) => x as &mut dyn $crate::node::SedBase, )+
                }
            }
        }

        impl $crate::node::SedBase for $ty {
            fn base(&self) -> &$crate::node::NodeBase {
                self.inner().base()
            }

            fn base_mut(&mut self) -> &mut $crate::node::NodeBase {
                self.inner_mut().base_mut()
            }

            fn type_code(&self) -> $crate::type_codes::TypeCode {
                self.inner().type_code()
            }

            fn element_name(&self) -> &'static str {
                self.inner().element_name()
            }

            fn has_required_attributes(&self) -> bool {
                self.inner().has_required_attributes()
            }

            fn has_required_elements(&self) -> bool {
                self.inner().has_required_elements()
            }

            fn add_expected_attributes(
                &self,
                expected: &mut $crate::xml::attributes::ExpectedAttributes,
            ) {
                self.inner().add_expected_attributes(expected)
            }

            fn read_attributes(
                &mut self,
                attributes: &$crate::xml::XmlAttributes,
                expected: &$crate::xml::attributes::ExpectedAttributes,
                log: &mut $crate::diagnostics::ErrorLog,
            ) {
                self.inner_mut().read_attributes(attributes, expected, log)
            }

            fn write_attributes(&self, out: &mut $crate::xml::XmlAttributes) {
                self.inner().write_attributes(out)
            }

            fn create_object(
                &mut self,
                name: &str,
                log: &mut $crate::diagnostics::ErrorLog,
            ) -> Option<&mut dyn $crate::node::SedBase> {
                self.inner_mut().create_object(name, log)
            }

            fn children(&self) -> Vec<&dyn $crate::node::SedBase> {
                self.inner().children()
            }

            fn children_mut(&mut self) -> Vec<&mut dyn $crate::node::SedBase> {
                self.inner_mut().children_mut()
            }

            fn accepts_other_xml(&self, token: &$crate::xml::XmlToken) -> bool {
                self.inner().accepts_other_xml(token)
            }

            fn read_other_xml(
                &mut self,
                token: &$crate::xml::XmlToken,
                fragment: $crate::xml::XmlFragment,
                log: &mut $crate::diagnostics::ErrorLog,
            ) {
                self.inner_mut().read_other_xml(token, fragment, log)
            }

            fn other_xml(&self) -> Option<&$crate::xml::XmlFragment> {
                self.inner().other_xml()
            }

            fn rename_own_sid_refs(&mut self, old_id: &str, new_id: &str) {
                self.inner_mut().rename_own_sid_refs(old_id, new_id)
            }
        }
    };
}

mod change;
mod data_generator;
mod document;
mod output;
mod sed_model;
mod simulation;
mod task;

pub use change::{Change, ChangeAttribute, RemoveXml};
pub use data_generator::{DataGenerator, Parameter, Variable};
pub use document::SedDocument;
pub use output::{Curve, DataSet, Output, Plot2D, Report};
pub use sed_model::SedModel;
pub use simulation::{
    Algorithm, AlgorithmParameter, OneStep, Simulation, SteadyState, UniformTimeCourse,
};
pub use task::Task;
