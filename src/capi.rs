//! Flat function façade over the object model
//!
//! Each function takes its handle as an `Option`, standing in for a possibly
//! null pointer, and answers a missing handle with a sentinel instead of
//! panicking: `None` for lookups, `false` for predicates, `0` for counts and
//! [`OperationError::InvalidObject`] (-5) for status-returning calls.
//!
//! Names follow the established `Kind_operation` convention so code written
//! against the classic flat interface reads the same.

#![allow(non_snake_case)]

use crate::error::{OperationError, OperationResult, status_code};
use crate::model::{Change, DataGenerator, Output, SedDocument, SedModel, Simulation, Task};
use crate::node::{ListItem, ListOf, SedBase};
use crate::parser::read_sedml_from_string;
use crate::type_codes::TypeCode;
use crate::writer::write_sedml_to_string;

const INVALID_OBJECT: i32 = -5;
const OPERATION_FAILED: i32 = -3;

fn status_of(result: OperationResult) -> i32 {
    status_code(&result)
}

fn bool_status(value: bool) -> i32 {
    i32::from(value)
}

/// Status of a typed add: -5 for a missing target, -3 for a missing item
fn add_status<P, T>(
    parent: Option<&mut P>,
    item: Option<&T>,
    add: impl FnOnce(&mut P, &T) -> OperationResult,
) -> i32 {
    match (parent, item) {
        (None, _) => INVALID_OBJECT,
        (Some(_), None) => OPERATION_FAILED,
        (Some(parent), Some(item)) => status_of(add(parent, item)),
    }
}

// Documents

/// Create an empty document at (level, version)
pub fn SedDocument_create(level: u32, version: u32) -> Box<SedDocument> {
    Box::new(SedDocument::new(level, version))
}

/// Release a document
pub fn SedDocument_free(doc: Option<Box<SedDocument>>) {
    drop(doc);
}

/// Deep copy of a document
pub fn SedDocument_clone(doc: Option<&SedDocument>) -> Option<Box<SedDocument>> {
    doc.map(|d| Box::new(d.clone()))
}

/// Level of the document, 0 for a missing handle
pub fn SedDocument_getLevel(doc: Option<&SedDocument>) -> u32 {
    doc.map_or(0, |d| d.level())
}

/// Version of the document, 0 for a missing handle
pub fn SedDocument_getVersion(doc: Option<&SedDocument>) -> u32 {
    doc.map_or(0, |d| d.version())
}

/// Move the document to another level and version
pub fn SedDocument_setLevelAndVersion(doc: Option<&mut SedDocument>, level: u32, version: u32) -> i32 {
    doc.map_or(INVALID_OBJECT, |d| status_of(d.set_level_and_version(level, version)))
}

/// Number of diagnostics recorded while reading
pub fn SedDocument_getNumErrors(doc: Option<&SedDocument>) -> usize {
    doc.map_or(0, SedDocument::num_errors)
}

/// Number of models
pub fn SedDocument_getNumModels(doc: Option<&SedDocument>) -> usize {
    doc.map_or(0, SedDocument::num_models)
}

/// Model at index `n`
pub fn SedDocument_getModel(doc: Option<&SedDocument>, n: usize) -> Option<&SedModel> {
    doc?.model(n)
}

/// Model with identifier `id`
pub fn SedDocument_getModelById<'a>(doc: Option<&'a SedDocument>, id: &str) -> Option<&'a SedModel> {
    doc?.models().get_by_id(id)
}

/// Add a copy of `model`
pub fn SedDocument_addModel(doc: Option<&mut SedDocument>, model: Option<&SedModel>) -> i32 {
    add_status(doc, model, SedDocument::add_model)
}

/// Create and attach a new model
pub fn SedDocument_createModel(doc: Option<&mut SedDocument>) -> Option<&mut SedModel> {
    doc.map(SedDocument::create_model)
}

/// Detach and return the model at index `n`
pub fn SedDocument_removeModel(doc: Option<&mut SedDocument>, n: usize) -> Option<Box<SedModel>> {
    doc?.models_mut().remove(n).map(Box::new)
}

/// Number of simulations
pub fn SedDocument_getNumSimulations(doc: Option<&SedDocument>) -> usize {
    doc.map_or(0, SedDocument::num_simulations)
}

/// Simulation at index `n`
pub fn SedDocument_getSimulation(doc: Option<&SedDocument>, n: usize) -> Option<&Simulation> {
    doc?.simulation(n)
}

/// Add a copy of `simulation`
pub fn SedDocument_addSimulation(doc: Option<&mut SedDocument>, simulation: Option<&Simulation>) -> i32 {
    add_status(doc, simulation, SedDocument::add_simulation)
}

/// Create and attach a new uniform time course
pub fn SedDocument_createUniformTimeCourse(doc: Option<&mut SedDocument>) -> Option<&mut Simulation> {
    doc.map(SedDocument::create_uniform_time_course)
}

/// Number of tasks
pub fn SedDocument_getNumTasks(doc: Option<&SedDocument>) -> usize {
    doc.map_or(0, SedDocument::num_tasks)
}

/// Task at index `n`
pub fn SedDocument_getTask(doc: Option<&SedDocument>, n: usize) -> Option<&Task> {
    doc?.task(n)
}

/// Add a copy of `task`
pub fn SedDocument_addTask(doc: Option<&mut SedDocument>, task: Option<&Task>) -> i32 {
    add_status(doc, task, SedDocument::add_task)
}

/// Create and attach a new task
pub fn SedDocument_createTask(doc: Option<&mut SedDocument>) -> Option<&mut Task> {
    doc.map(SedDocument::create_task)
}

/// Number of data generators
pub fn SedDocument_getNumDataGenerators(doc: Option<&SedDocument>) -> usize {
    doc.map_or(0, SedDocument::num_data_generators)
}

/// Add a copy of `generator`
pub fn SedDocument_addDataGenerator(
    doc: Option<&mut SedDocument>,
    generator: Option<&DataGenerator>,
) -> i32 {
    add_status(doc, generator, SedDocument::add_data_generator)
}

/// Number of outputs
pub fn SedDocument_getNumOutputs(doc: Option<&SedDocument>) -> usize {
    doc.map_or(0, SedDocument::num_outputs)
}

/// Add a copy of `output`
pub fn SedDocument_addOutput(doc: Option<&mut SedDocument>, output: Option<&Output>) -> i32 {
    add_status(doc, output, SedDocument::add_output)
}

/// Parse a document from text
pub fn readSedMLFromString(xml: Option<&str>) -> Option<Box<SedDocument>> {
    xml.map(|x| Box::new(read_sedml_from_string(x)))
}

/// Serialize a document to text
pub fn writeSedMLToString(doc: Option<&SedDocument>) -> Option<String> {
    match write_sedml_to_string(doc?) {
        Ok(xml) => Some(xml),
        Err(e) => {
            log::warn!("failed to serialize document: {}", e);
            None
        }
    }
}

// Models

/// Create a detached model at (level, version)
pub fn SedModel_create(level: u32, version: u32) -> Box<SedModel> {
    Box::new(SedModel::new(level, version))
}

/// Release a model
pub fn SedModel_free(model: Option<Box<SedModel>>) {
    drop(model);
}

/// Deep copy of a model
pub fn SedModel_clone(model: Option<&SedModel>) -> Option<Box<SedModel>> {
    model.map(|m| Box::new(m.clone()))
}

/// Identifier of the model
pub fn SedModel_getId(model: Option<&SedModel>) -> Option<&str> {
    model?.id()
}

/// Set the identifier; `None` unsets it
pub fn SedModel_setId(model: Option<&mut SedModel>, id: Option<&str>) -> i32 {
    model.map_or(INVALID_OBJECT, |m| status_of(m.set_id(id.unwrap_or(""))))
}

/// Whether the identifier is set
pub fn SedModel_isSetId(model: Option<&SedModel>) -> bool {
    model.is_some_and(|m| m.is_set_id())
}

/// Unset the identifier
pub fn SedModel_unsetId(model: Option<&mut SedModel>) -> i32 {
    model.map_or(INVALID_OBJECT, |m| status_of(m.unset_id()))
}

/// Human-readable name of the model
pub fn SedModel_getName(model: Option<&SedModel>) -> Option<&str> {
    model?.name()
}

/// Set the name; `None` unsets it
pub fn SedModel_setName(model: Option<&mut SedModel>, name: Option<&str>) -> i32 {
    model.map_or(INVALID_OBJECT, |m| status_of(m.set_name(name.unwrap_or(""))))
}

/// Language URN of the model
pub fn SedModel_getLanguage(model: Option<&SedModel>) -> Option<&str> {
    model?.language()
}

/// Set the language; `None` unsets it
pub fn SedModel_setLanguage(model: Option<&mut SedModel>, language: Option<&str>) -> i32 {
    model.map_or(INVALID_OBJECT, |m| match language {
        Some(language) => status_of(m.set_language(language)),
        None => status_of(m.unset_language()),
    })
}

/// Whether the language is set
pub fn SedModel_isSetLanguage(model: Option<&SedModel>) -> bool {
    model.is_some_and(SedModel::is_set_language)
}

/// Source location of the model
pub fn SedModel_getSource(model: Option<&SedModel>) -> Option<&str> {
    model?.source()
}

/// Set the source; `None` unsets it
pub fn SedModel_setSource(model: Option<&mut SedModel>, source: Option<&str>) -> i32 {
    model.map_or(INVALID_OBJECT, |m| match source {
        Some(source) => status_of(m.set_source(source)),
        None => status_of(m.unset_source()),
    })
}

/// Whether the source is set
pub fn SedModel_isSetSource(model: Option<&SedModel>) -> bool {
    model.is_some_and(SedModel::is_set_source)
}

/// Unset the source
pub fn SedModel_unsetSource(model: Option<&mut SedModel>) -> i32 {
    model.map_or(INVALID_OBJECT, |m| status_of(m.unset_source()))
}

/// 1 when every required attribute is set, 0 otherwise or for a missing handle
pub fn SedModel_hasRequiredAttributes(model: Option<&SedModel>) -> i32 {
    bool_status(model.is_some_and(|m| m.has_required_attributes()))
}

/// Number of changes
pub fn SedModel_getNumChanges(model: Option<&SedModel>) -> usize {
    model.map_or(0, SedModel::num_changes)
}

/// Add a copy of `change`
pub fn SedModel_addChange(model: Option<&mut SedModel>, change: Option<&Change>) -> i32 {
    add_status(model, change, SedModel::add_change)
}

// Tasks

/// Create a detached task at (level, version)
pub fn SedTask_create(level: u32, version: u32) -> Box<Task> {
    Box::new(Task::new(level, version))
}

/// Release a task
pub fn SedTask_free(task: Option<Box<Task>>) {
    drop(task);
}

/// Set the identifier; `None` unsets it
pub fn SedTask_setId(task: Option<&mut Task>, id: Option<&str>) -> i32 {
    task.map_or(INVALID_OBJECT, |t| status_of(t.set_id(id.unwrap_or(""))))
}

/// Identifier of the model the task runs
pub fn SedTask_getModelReference(task: Option<&Task>) -> Option<&str> {
    task?.model_reference()
}

/// Set the model reference; `None` unsets it
pub fn SedTask_setModelReference(task: Option<&mut Task>, id: Option<&str>) -> i32 {
    task.map_or(INVALID_OBJECT, |t| status_of(t.set_model_reference(id.unwrap_or(""))))
}

/// Whether the model reference is set
pub fn SedTask_isSetModelReference(task: Option<&Task>) -> bool {
    task.is_some_and(Task::is_set_model_reference)
}

/// Identifier of the simulation the task runs
pub fn SedTask_getSimulationReference(task: Option<&Task>) -> Option<&str> {
    task?.simulation_reference()
}

/// Set the simulation reference; `None` unsets it
pub fn SedTask_setSimulationReference(task: Option<&mut Task>, id: Option<&str>) -> i32 {
    task.map_or(INVALID_OBJECT, |t| {
        status_of(t.set_simulation_reference(id.unwrap_or("")))
    })
}

// Any node

/// Type code of a node, [`TypeCode::Unknown`] for a missing handle
pub fn SedBase_getTypeCode(node: Option<&dyn SedBase>) -> i32 {
    node.map_or(TypeCode::Unknown, |n| n.type_code()).code()
}

/// Element name of a node
pub fn SedBase_getElementName(node: Option<&dyn SedBase>) -> Option<&'static str> {
    node.map(|n| n.element_name())
}

/// 1-based source line, 0 when unknown
pub fn SedBase_getLine(node: Option<&dyn SedBase>) -> u32 {
    node.map_or(0, |n| n.line())
}

/// 1-based source column, 0 when unknown
pub fn SedBase_getColumn(node: Option<&dyn SedBase>) -> u32 {
    node.map_or(0, |n| n.column())
}

/// Rewrite references to `old_id` below and at `node`
pub fn SedBase_renameSIdRefs(node: Option<&mut dyn SedBase>, old_id: &str, new_id: &str) -> i32 {
    match node {
        Some(node) => {
            node.rename_sid_refs(old_id, new_id);
            status_of(Ok(()))
        }
        None => INVALID_OBJECT,
    }
}

/// `<notes>` of a node as XML text
pub fn SedBase_getNotesString(node: Option<&dyn SedBase>) -> Option<String> {
    node.and_then(|n| n.notes()).map(|f| f.to_string())
}

/// Set `<notes>` from an element or its content, unset on an empty string
pub fn SedBase_setNotes(node: Option<&mut dyn SedBase>, xml: &str) -> i32 {
    node.map_or(INVALID_OBJECT, |n| status_of(n.set_notes(xml)))
}

/// Whether `<notes>` is set
pub fn SedBase_isSetNotes(node: Option<&dyn SedBase>) -> bool {
    node.is_some_and(|n| n.is_set_notes())
}

/// `<annotation>` of a node as XML text
pub fn SedBase_getAnnotationString(node: Option<&dyn SedBase>) -> Option<String> {
    node.and_then(|n| n.annotation()).map(|f| f.to_string())
}

/// Set `<annotation>` from an element or its content, unset on an empty string
pub fn SedBase_setAnnotation(node: Option<&mut dyn SedBase>, xml: &str) -> i32 {
    node.map_or(INVALID_OBJECT, |n| status_of(n.set_annotation(xml)))
}

/// Whether `<annotation>` is set
pub fn SedBase_isSetAnnotation(node: Option<&dyn SedBase>) -> bool {
    node.is_some_and(|n| n.is_set_annotation())
}

// Data generators

/// MathML `<math>` of a data generator as XML text
pub fn SedDataGenerator_getMathString(dg: Option<&DataGenerator>) -> Option<String> {
    dg.and_then(|d| d.math()).map(|f| f.to_string())
}

/// Set the `<math>` expression
pub fn SedDataGenerator_setMath(dg: Option<&mut DataGenerator>, xml: &str) -> i32 {
    dg.map_or(INVALID_OBJECT, |d| status_of(d.set_math(xml)))
}

/// Whether `<math>` is set
pub fn SedDataGenerator_isSetMath(dg: Option<&DataGenerator>) -> bool {
    dg.is_some_and(|d| d.is_set_math())
}

// Collections

/// Number of items, 0 for a missing handle
pub fn SedListOf_size<T: ListItem>(list: Option<&ListOf<T>>) -> usize {
    list.map_or(0, ListOf::size)
}

/// Item at index `n`
pub fn SedListOf_get<T: ListItem>(list: Option<&ListOf<T>>, n: usize) -> Option<&T> {
    list?.get(n)
}

/// First item with identifier `id`
pub fn SedListOf_getById<'a, T: ListItem>(list: Option<&'a ListOf<T>>, id: &str) -> Option<&'a T> {
    list?.get_by_id(id)
}

/// Append a copy of `item`; a missing list or item is an invalid object
pub fn SedListOf_append<T: ListItem>(list: Option<&mut ListOf<T>>, item: Option<&T>) -> i32 {
    match (list, item) {
        (Some(list), Some(item)) => status_of(list.append(item)),
        _ => OperationError::InvalidObject.code(),
    }
}

/// Detach and return the item at index `n`
pub fn SedListOf_remove<T: ListItem>(list: Option<&mut ListOf<T>>, n: usize) -> Option<Box<T>> {
    list?.remove(n).map(Box::new)
}

/// Detach and return the first item with identifier `id`
pub fn SedListOf_removeById<T: ListItem>(list: Option<&mut ListOf<T>>, id: &str) -> Option<Box<T>> {
    list?.remove_by_id(id).map(Box::new)
}
