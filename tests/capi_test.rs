//! Exercising the object model through the flat function interface

use libsedml::SedBase;
use libsedml::capi::*;
use libsedml::{SedModel, Task};

#[test]
fn test_create_lookup_remove_through_flat_calls() {
    let mut doc = SedDocument_create(1, 3);
    assert!(SedDocument_createModel(Some(&mut doc)).is_some());
    assert!(SedDocument_createModel(Some(&mut doc)).is_some());
    assert_eq!(SedDocument_getNumModels(Some(&doc)), 2);

    assert_eq!(SedModel_hasRequiredAttributes(SedDocument_getModel(Some(&doc), 0)), 0);

    let first = doc.models_mut().get_mut(0);
    assert_eq!(SedModel_setId(first, Some("m1")), 0);
    let second = doc.models_mut().get_mut(1);
    assert_eq!(SedModel_setId(second, Some("m2")), 0);
    assert_eq!(SedModel_hasRequiredAttributes(SedDocument_getModel(Some(&doc), 1)), 1);

    let found = SedDocument_getModelById(Some(&doc), "m2");
    assert_eq!(SedModel_getId(found), Some("m2"));

    let removed = SedDocument_removeModel(Some(&mut doc), 0).unwrap();
    assert_eq!(SedModel_getId(Some(&removed)), Some("m1"));
    SedModel_free(Some(removed));
    assert_eq!(SedDocument_getNumModels(Some(&doc)), 1);
    assert!(SedDocument_removeModel(Some(&mut doc), 5).is_none());

    let xml = writeSedMLToString(Some(&doc)).unwrap();
    assert!(xml.contains(r#"<model id="m2"/>"#));
    SedDocument_free(Some(doc));
}

#[test]
fn test_add_copies_and_reports_status() {
    let mut doc = SedDocument_create(1, 3);
    let mut model = SedModel_create(1, 3);

    assert_eq!(SedDocument_addModel(Some(&mut doc), Some(&model)), -5);
    SedModel_setId(Some(&mut model), Some("m"));
    assert_eq!(SedDocument_addModel(Some(&mut doc), Some(&model)), 0);

    let mut other_version = SedModel_create(1, 2);
    SedModel_setId(Some(&mut other_version), Some("old"));
    assert_eq!(SedDocument_addModel(Some(&mut doc), Some(&other_version)), -8);

    // The stored copy does not follow the caller's object
    SedModel_setName(Some(&mut model), Some("renamed"));
    assert_eq!(SedModel_getName(SedDocument_getModel(Some(&doc), 0)), None);
}

#[test]
fn test_invalid_id_rejected() {
    let mut model = SedModel_create(1, 3);
    assert_eq!(SedModel_setId(Some(&mut model), Some("has space")), -4);
    assert!(!SedModel_isSetId(Some(&model)));
    assert_eq!(SedModel_setId(Some(&mut model), Some("ok")), 0);
    assert_eq!(SedModel_unsetId(Some(&mut model)), 0);
    assert!(!SedModel_isSetId(Some(&model)));
}

#[test]
fn test_task_references_and_rename() {
    let mut doc = SedDocument_create(1, 3);
    let task = SedDocument_createTask(Some(&mut doc)).unwrap();
    assert_eq!(SedTask_setId(Some(&mut *task), Some("t")), 0);
    assert_eq!(SedTask_setModelReference(Some(&mut *task), Some("m")), 0);
    assert_eq!(SedTask_setSimulationReference(Some(&mut *task), Some("s")), 0);

    assert_eq!(SedBase_renameSIdRefs(Some(&mut *doc), "m", "model"), 0);
    let task = SedDocument_getTask(Some(&doc), 0);
    assert_eq!(SedTask_getModelReference(task), Some("model"));
    assert_eq!(SedTask_getSimulationReference(task), Some("s"));
    assert_eq!(SedBase_renameSIdRefs(None, "a", "b"), -5);
}

#[test]
fn test_standalone_task_add() {
    let mut doc = SedDocument_create(1, 3);
    let mut task: Box<Task> = SedTask_create(1, 3);
    SedTask_setId(Some(&mut task), Some("t"));
    SedTask_setModelReference(Some(&mut task), Some("m"));
    assert!(SedTask_isSetModelReference(Some(&task)));
    assert_eq!(SedDocument_addTask(Some(&mut doc), Some(&task)), 0);
    assert_eq!(SedDocument_getNumTasks(Some(&doc)), 1);
    SedTask_free(Some(task));
}

#[test]
fn test_read_through_flat_calls() {
    let xml = r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version3" level="1" version="3">
  <listOfModels>
    <model id="m" language="urn:sedml:language:sbml" source="m.xml"/>
  </listOfModels>
</sedML>"#;
    let doc = readSedMLFromString(Some(xml)).unwrap();
    assert_eq!(SedDocument_getNumErrors(Some(&doc)), 0);
    assert_eq!(SedDocument_getLevel(Some(&doc)), 1);
    assert_eq!(SedDocument_getVersion(Some(&doc)), 3);

    let model = SedDocument_getModel(Some(&doc), 0);
    assert_eq!(SedModel_getLanguage(model), Some("urn:sedml:language:sbml"));
    assert_eq!(SedBase_getLine(model.map(|m| m as &dyn SedBase)), 3);
    assert_eq!(SedBase_getElementName(model.map(|m| m as &dyn SedBase)), Some("model"));
    assert_eq!(SedBase_getTypeCode(model.map(|m| m as &dyn SedBase)), 2);

    assert!(readSedMLFromString(None).is_none());
    assert!(writeSedMLToString(None).is_none());
}

#[test]
fn test_generic_list_calls() {
    let mut doc = SedDocument_create(1, 3);
    let mut model = SedModel::new(1, 3);
    model.set_id("a").unwrap();
    assert_eq!(SedListOf_append(Some(doc.models_mut()), Some(&model)), 0);
    model.set_id("b").unwrap();
    assert_eq!(SedListOf_append(Some(doc.models_mut()), Some(&model)), 0);

    assert_eq!(SedListOf_size(Some(doc.models())), 2);
    assert_eq!(SedListOf_getById(Some(doc.models()), "b").and_then(|m| m.id()), Some("b"));
    assert!(SedListOf_get(Some(doc.models()), 2).is_none());

    let removed = SedListOf_removeById(Some(doc.models_mut()), "a").unwrap();
    assert_eq!(removed.id(), Some("a"));
    assert!(SedListOf_remove::<SedModel>(Some(doc.models_mut()), 3).is_none());
    assert_eq!(SedListOf_size::<SedModel>(None), 0);
}

#[test]
fn test_document_level_change_and_clone() {
    let mut doc = SedDocument_create(1, 3);
    assert_eq!(SedDocument_setLevelAndVersion(Some(&mut doc), 1, 2), 0);
    assert_eq!(SedDocument_getVersion(Some(&doc)), 2);

    let copy = SedDocument_clone(Some(&doc)).unwrap();
    assert_eq!(*copy, *doc);
    assert!(SedDocument_clone(None).is_none());
    assert_eq!(SedDocument_setLevelAndVersion(None, 1, 2), -5);
}

#[test]
fn test_notes_annotation_and_math_through_flat_calls() {
    let mut doc = SedDocument_create(1, 4);
    assert_eq!(SedBase_setNotes(Some(&mut *doc), "<p>about</p>"), 0);
    assert!(SedBase_isSetNotes(Some(&*doc)));
    assert_eq!(
        SedBase_getNotesString(Some(&*doc)).as_deref(),
        Some("<notes><p>about</p></notes>")
    );
    assert_eq!(SedBase_setAnnotation(Some(&mut *doc), "<a><b></a>"), -9);
    assert!(!SedBase_isSetAnnotation(Some(&*doc)));
    assert_eq!(SedBase_setAnnotation(None, "<x/>"), -5);

    let dg = doc.create_data_generator();
    assert!(!SedDataGenerator_isSetMath(Some(&*dg)));
    assert_eq!(SedDataGenerator_setMath(Some(&mut *dg), "<ci>v</ci>"), 0);
    assert_eq!(
        SedDataGenerator_getMathString(Some(&*dg)).as_deref(),
        Some(r#"<math xmlns="http://www.w3.org/1998/Math/MathML"><ci>v</ci></math>"#)
    );
    assert_eq!(SedDataGenerator_setMath(None, "<ci>v</ci>"), -5);
}
