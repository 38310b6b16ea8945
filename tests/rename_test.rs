//! Identifier reference rewriting across a whole document

use libsedml::{SedBase, SedDocument, read_sedml_from_string, write_sedml_to_string};

const DOC: &str = r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version3" level="1" version="3">
  <listOfModels>
    <model id="m1" source="a.xml"/>
    <model id="m2" source="b.xml"/>
  </listOfModels>
  <listOfSimulations>
    <steadyState id="ss"/>
  </listOfSimulations>
  <listOfTasks>
    <task id="t1" modelReference="m1" simulationReference="ss"/>
    <task id="t2" modelReference="m2" simulationReference="ss"/>
  </listOfTasks>
  <listOfDataGenerators>
    <dataGenerator id="dg1">
      <listOfVariables>
        <variable id="v1" taskReference="t1" modelReference="m1" target="/sbml/model/m1"/>
      </listOfVariables>
    </dataGenerator>
  </listOfDataGenerators>
  <listOfOutputs>
    <plot2D id="p">
      <listOfCurves>
        <curve logX="false" logY="false" xDataReference="dg1" yDataReference="dg1"/>
      </listOfCurves>
    </plot2D>
    <report id="r">
      <listOfDataSets>
        <dataSet id="d" label="x" dataReference="dg1"/>
      </listOfDataSets>
    </report>
  </listOfOutputs>
</sedML>"#;

fn rename_model(doc: &mut SedDocument, old_id: &str, new_id: &str) {
    doc.models_mut().get_by_id_mut(old_id).unwrap().set_id(new_id).unwrap();
    doc.rename_sid_refs(old_id, new_id);
}

#[test]
fn test_rename_reaches_every_reference() {
    let mut doc = read_sedml_from_string(DOC);
    assert_eq!(doc.num_errors(), 0, "{:?}", doc.error_log());

    rename_model(&mut doc, "m1", "wildtype");

    assert_eq!(doc.task(0).unwrap().model_reference(), Some("wildtype"));
    assert_eq!(doc.task(1).unwrap().model_reference(), Some("m2"));
    let variable = doc.data_generator(0).unwrap().variables().get(0).unwrap();
    assert_eq!(variable.model_reference(), Some("wildtype"));
    assert_eq!(variable.task_reference(), Some("t1"));
    // Free text that happens to contain the id is not a reference
    assert_eq!(variable.target(), Some("/sbml/model/m1"));
}

#[test]
fn test_rename_data_generator_updates_outputs() {
    let mut doc = read_sedml_from_string(DOC);
    doc.rename_sid_refs("dg1", "signal");

    let xml = write_sedml_to_string(&doc).unwrap();
    assert!(xml.contains(r#"xDataReference="signal""#));
    assert!(xml.contains(r#"yDataReference="signal""#));
    assert!(xml.contains(r#"dataReference="signal""#));
    // Only references move, the definition keeps its id
    assert!(xml.contains(r#"<dataGenerator id="dg1">"#));
    assert_eq!(xml.matches(r#"Reference="dg1""#).count(), 0);
}

#[test]
fn test_rename_to_invalid_id_leaves_references() {
    let mut doc = read_sedml_from_string(DOC);
    doc.rename_sid_refs("ss", "not an id");
    assert!(doc.tasks().iter().all(|t| t.simulation_reference() == Some("ss")));
}

#[test]
fn test_rename_on_subtree_only() {
    let mut doc = read_sedml_from_string(DOC);
    doc.tasks_mut().get_mut(0).unwrap().rename_sid_refs("ss", "steady");

    assert_eq!(doc.task(0).unwrap().simulation_reference(), Some("steady"));
    assert_eq!(doc.task(1).unwrap().simulation_reference(), Some("ss"));
}

#[test]
fn test_rename_survives_round_trip() {
    let mut doc = read_sedml_from_string(DOC);
    doc.rename_sid_refs("t1", "first");
    let again = read_sedml_from_string(&write_sedml_to_string(&doc).unwrap());
    let variable = again.data_generator(0).unwrap().variables().get(0).unwrap();
    assert_eq!(variable.task_reference(), Some("first"));
    assert_eq!(again, doc);
}
