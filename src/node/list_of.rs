//! Ordered, owning collections of sibling nodes

use super::{NodeBase, ParentInfo, SedBase};
use crate::diagnostics::{ErrorLog, LogMark, SedErrorCode};
use crate::error::{OperationError, OperationResult};
use crate::namespaces::SedNamespaces;
use crate::type_codes::TypeCode;
use crate::xml::XmlAttributes;
use crate::xml::attributes::ExpectedAttributes;
use std::fmt;

/// A node kind that can be stored in a [`ListOf`]
pub trait ListItem: SedBase + Clone + PartialEq + 'static {
    /// Kind or family admitted by the list
    const ITEM_TYPE: TypeCode;

    /// Tag of the wrapping list element, e.g. `listOfModels`
    const LIST_ELEMENT: &'static str;

    /// Id unknown attributes on the list element are refined into
    const LIST_ATTRIBUTES_CODE: SedErrorCode;

    /// Empty item for child element `name`, or `None` if the name is not a member
    fn create_for_element(name: &str, namespaces: &SedNamespaces) -> Option<Self>;
}

/// Ordered, owned sequence of nodes, itself a node
pub struct ListOf<T: ListItem> {
    base: NodeBase,
    items: Vec<T>,
    attribute_marks: Option<(LogMark, LogMark)>,
}

impl<T: ListItem> ListOf<T> {
    /// Create an empty list at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        Self {
            base: NodeBase::new(level, version),
            items: Vec::new(),
            attribute_marks: None,
        }
    }

    /// Number of items
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Whether the list holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable item at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// First item whose identifier is `id`
    pub fn get_by_id(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == Some(id))
    }

    /// Mutable first item whose identifier is `id`
    pub fn get_by_id_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == Some(id))
    }

    /// Iterate items in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterate items mutably in order
    ///
    /// Identifiers and attributes may be changed freely; the structure of the
    /// list cannot.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Whether `item` is of a kind this list admits
    pub fn is_valid_type_for_list(&self, item: &dyn SedBase) -> bool {
        item.type_code().is_a(T::ITEM_TYPE)
    }

    fn check_addition(&self, item: &T) -> OperationResult {
        if !self.is_valid_type_for_list(item) || !item.has_required_attributes() {
            Err(OperationError::InvalidObject)
        } else if item.level() != self.level() {
            Err(OperationError::LevelMismatch)
        } else if item.version() != self.version() {
            Err(OperationError::VersionMismatch)
        } else if !self
            .base
            .sed_namespaces()
            .accepts(item.base().sed_namespaces())
        {
            Err(OperationError::NamespacesMismatch)
        } else {
            Ok(())
        }
    }

    /// Append a copy of `item`; the caller keeps the original
    pub fn append(&mut self, item: &T) -> OperationResult {
        self.check_addition(item)?;
        self.push_owned(item.clone());
        Ok(())
    }

    /// Append `item`, taking ownership
    pub fn append_and_own(&mut self, item: T) -> OperationResult {
        self.check_addition(&item)?;
        self.push_owned(item);
        Ok(())
    }

    /// Insert a copy of `item` at `index`; out-of-range positions append
    pub fn insert(&mut self, index: usize, item: &T) -> OperationResult {
        self.check_addition(item)?;
        self.insert_owned(index, item.clone());
        Ok(())
    }

    /// Insert `item` at `index`, taking ownership; out-of-range positions append
    pub fn insert_and_own(&mut self, index: usize, item: T) -> OperationResult {
        self.check_addition(&item)?;
        self.insert_owned(index, item);
        Ok(())
    }

    /// Append copies of every item of `other`, stopping at the first failure
    pub fn append_from(&mut self, other: &ListOf<T>) -> OperationResult {
        for item in other.iter() {
            self.append(item)?;
        }
        Ok(())
    }

    /// Detach and return the item at `index`
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let mut item = self.items.remove(index);
        item.base_mut().detach();
        item.set_sed_document(false);
        item.connect_to_child();
        self.connect_to_child();
        Some(item)
    }

    /// Detach and return the first item whose identifier is `id`
    pub fn remove_by_id(&mut self, id: &str) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == Some(id))?;
        self.remove(index)
    }

    /// Drop every item
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Append without admission checks and return the stored item
    pub(crate) fn push_owned(&mut self, item: T) -> &mut T {
        let index = self.items.len();
        self.items.push(item);
        let info = ParentInfo::new(TypeCode::ListOf, &self.base);
        let stored = &mut self.items[index];
        stored.connect_to_parent(&info, index);
        stored
    }

    fn insert_owned(&mut self, index: usize, item: T) {
        if index >= self.items.len() {
            self.push_owned(item);
        } else {
            self.items.insert(index, item);
            self.connect_to_child();
        }
    }
}

impl<T: ListItem> SedBase for ListOf<T> {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::ListOf
    }

    fn element_name(&self) -> &'static str {
        T::LIST_ELEMENT
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        let start = log.mark();
        self.base
            .read_core_attributes(T::LIST_ELEMENT, attributes, expected, log);
        self.attribute_marks = Some((start, log.mark()));
    }

    fn create_object(&mut self, name: &str, log: &mut ErrorLog) -> Option<&mut dyn SedBase> {
        let item = T::create_for_element(name, self.base.sed_namespaces())?;
        if self.items.is_empty() {
            if let Some((start, end)) = self.attribute_marks.take() {
                log.reclassify_between(
                    start,
                    end,
                    SedErrorCode::UnknownCoreAttribute,
                    T::LIST_ATTRIBUTES_CODE,
                );
            }
        }
        let stored: &mut dyn SedBase = self.push_owned(item);
        Some(stored)
    }

    fn children(&self) -> Vec<&dyn SedBase> {
        self.items.iter().map(|item| item as &dyn SedBase).collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedBase> {
        self.items
            .iter_mut()
            .map(|item| item as &mut dyn SedBase)
            .collect()
    }

    fn list_size(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

impl<T: ListItem> Clone for ListOf<T> {
    /// Deep copy; the copy is a detached root with relinked items
    fn clone(&self) -> Self {
        let mut copy = Self {
            base: self.base.clone(),
            items: self.items.clone(),
            attribute_marks: None,
        };
        copy.connect_to_child();
        copy
    }
}

impl<T: ListItem> PartialEq for ListOf<T> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.items == other.items
    }
}

impl<T: ListItem> fmt::Debug for ListOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(T::LIST_ELEMENT)
            .field("base", &self.base)
            .field("items", &self.items)
            .finish()
    }
}

impl<'a, T: ListItem> IntoIterator for &'a ListOf<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SedModel;

    fn model(id: &str) -> SedModel {
        let mut m = SedModel::new(1, 3);
        m.set_id(id).unwrap();
        m.set_source("urn:miriam:biomodels.db:BIOMD0000000012").unwrap();
        m.set_language("urn:sedml:language:sbml").unwrap();
        m
    }

    #[test]
    fn test_append_checks() {
        let mut list: ListOf<SedModel> = ListOf::new(1, 3);
        assert_eq!(list.append(&SedModel::new(1, 3)), Err(OperationError::InvalidObject));

        let mut other_version = SedModel::new(1, 4);
        other_version.set_id("v").unwrap();
        other_version.set_language("urn:sedml:language:sbml").unwrap();
        assert_eq!(list.append(&other_version), Err(OperationError::VersionMismatch));

        let mut other_level = SedModel::new(2, 3);
        other_level.set_id("l").unwrap();
        other_level.set_language("urn:sedml:language:sbml").unwrap();
        assert_eq!(list.append(&other_level), Err(OperationError::LevelMismatch));

        let mut foreign = model("f");
        foreign
            .base_mut()
            .sed_namespaces_mut()
            .namespaces_mut()
            .add("http://www.sbml.org/sbml/level3/version1/core", "");
        assert_eq!(list.append(&foreign), Err(OperationError::NamespacesMismatch));
        assert_eq!(list.size(), 0);
    }

    #[test]
    fn test_append_and_own_then_get_last() {
        let mut list: ListOf<SedModel> = ListOf::new(1, 3);
        let m = model("a");
        list.append_and_own(m.clone()).unwrap();
        assert_eq!(list.get(list.size() - 1), Some(&m));
        assert_eq!(list.get(0).map(|x| x.base().path()), Some(&[0usize][..]));
        assert_eq!(list.get(0).and_then(|x| x.parent_type_code()), Some(TypeCode::ListOf));
    }

    #[test]
    fn test_insert_clamps_and_relinks() {
        let mut list: ListOf<SedModel> = ListOf::new(1, 3);
        list.append(&model("a")).unwrap();
        list.insert(99, &model("c")).unwrap();
        list.insert(1, &model("b")).unwrap();

        let ids: Vec<_> = list.iter().filter_map(|m| m.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        for (i, m) in list.iter().enumerate() {
            assert_eq!(m.base().path(), &[i][..]);
        }
    }

    #[test]
    fn test_lookup_is_first_match() {
        let mut list: ListOf<SedModel> = ListOf::new(1, 3);
        let mut first = model("dup");
        first.set_name("first").unwrap();
        let mut second = model("dup");
        second.set_name("second").unwrap();
        list.append(&first).unwrap();
        list.append(&second).unwrap();

        assert_eq!(list.get_by_id("dup").and_then(|m| m.name()), Some("first"));
        assert!(list.get_by_id("missing").is_none());
        assert!(list.get(2).is_none());
    }

    #[test]
    fn test_remove_detaches() {
        let mut list: ListOf<SedModel> = ListOf::new(1, 3);
        list.append(&model("a")).unwrap();
        list.append(&model("b")).unwrap();

        let removed = list.remove_by_id("a").unwrap();
        assert_eq!(removed.id(), Some("a"));
        assert!(removed.parent_type_code().is_none());
        assert_eq!(list.size(), 1);
        assert_eq!(list.get(0).map(|m| m.base().path()), Some(&[0usize][..]));
        assert!(list.remove(5).is_none());
        assert!(list.remove_by_id("a").is_none());
    }

    #[test]
    fn test_append_from_copies() {
        let mut a: ListOf<SedModel> = ListOf::new(1, 3);
        a.append(&model("x")).unwrap();
        let mut b: ListOf<SedModel> = ListOf::new(1, 3);
        b.append(&model("y")).unwrap();
        b.append_from(&a).unwrap();
        assert_eq!(b.size(), 2);
        assert_eq!(a.size(), 1);
        b.clear();
        assert!(b.is_empty());
    }

    #[test]
    fn test_create_object_reclassifies_list_attributes() {
        let mut list: ListOf<SedModel> = ListOf::new(1, 3);
        let mut attrs = XmlAttributes::new();
        attrs.add("bogus", "1");
        let mut expected = ExpectedAttributes::new();
        list.add_expected_attributes(&mut expected);
        let mut log = ErrorLog::new();

        list.read_attributes(&attrs, &expected, &mut log);
        assert!(log.contains(SedErrorCode::UnknownCoreAttribute));

        assert!(list.create_object("model", &mut log).is_some());
        assert!(!log.contains(SedErrorCode::UnknownCoreAttribute));
        assert!(log.contains(SedErrorCode::DocumentLoModelsAllowedCoreAttributes));
        assert!(list.create_object("task", &mut log).is_none());
        assert_eq!(list.size(), 1);
    }
}
