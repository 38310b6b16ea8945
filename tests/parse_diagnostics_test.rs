//! Diagnostics reported while reading imperfect documents
//!
//! Reading never fails outright: each test checks both the recorded
//! diagnostic and the part of the tree that could still be built.

use libsedml::{
    ReaderConfig, SedBase, SedErrorCode, SedReader, Severity, read_sedml_from_string,
};

fn wrap(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sedML xmlns="http://sed-ml.org/sed-ml/level1/version3" level="1" version="3">
{body}
</sedML>"#
    )
}

#[test]
fn test_unclosed_document_keeps_what_was_read() {
    let doc = read_sedml_from_string(
        r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version3" level="1" version="3">
  <listOfModels>
    <model id="m1"/>
  </listOfModels>"#,
    );
    let log = doc.error_log();
    assert!(
        log.contains(SedErrorCode::XmlUnexpectedEof) || log.contains(SedErrorCode::BadlyFormedXml)
    );
    assert!(log.has_fatal());
    assert_eq!(doc.num_models(), 1);
    assert_eq!(doc.model(0).unwrap().base().path(), &[0, 0]);
}

#[test]
fn test_mismatched_tags_are_badly_formed() {
    let doc = read_sedml_from_string(&wrap("<listOfModels></listOfTasks>"));
    let errors = doc.error_log().errors_with_code(SedErrorCode::BadlyFormedXml);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].severity, Severity::Fatal);
}

#[test]
fn test_doctype_rejected() {
    let doc = read_sedml_from_string("<!DOCTYPE sedML>\n<sedML/>");
    assert!(doc.error_log().contains(SedErrorCode::BadXmlDoctype));
}

#[test]
fn test_invalid_utf8_bytes() {
    let doc = SedReader::new().read_from_bytes(b"<sedML name=\"\xff\xfe\"/>");
    assert!(doc.error_log().contains(SedErrorCode::NotUtf8));
    assert_eq!(doc.num_models(), 0);
}

#[test]
fn test_unrecognized_element_is_skipped() {
    let doc = read_sedml_from_string(&wrap(
        r#"<listOfModels>
    <bogus id="x"><model id="inner"/></bogus>
    <model id="m"/>
  </listOfModels>"#,
    ));
    let errors = doc.error_log().errors_with_code(SedErrorCode::UnrecognizedElement);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line, 4);
    assert_eq!(doc.num_models(), 1);
    assert_eq!(doc.model(0).unwrap().id(), Some("m"));
}

#[test]
fn test_unknown_attribute_refined_per_kind() {
    let doc = read_sedml_from_string(&wrap(
        r#"<listOfModels>
    <model id="m" colour="red"/>
  </listOfModels>
  <listOfTasks>
    <task id="t" priority="high"/>
  </listOfTasks>"#,
    ));
    let log = doc.error_log();
    assert!(log.contains(SedErrorCode::ModelAllowedAttributes));
    assert!(log.contains(SedErrorCode::TaskAllowedAttributes));
    assert!(!log.contains(SedErrorCode::UnknownCoreAttribute));
    assert_eq!(log.num_errors(), 2);
}

#[test]
fn test_unknown_attribute_on_list_refined_by_first_item() {
    let doc = read_sedml_from_string(&wrap(
        r#"<listOfModels sort="asc">
    <model id="m"/>
  </listOfModels>"#,
    ));
    let log = doc.error_log();
    assert!(log.contains(SedErrorCode::DocumentLoModelsAllowedCoreAttributes));
    assert!(!log.contains(SedErrorCode::UnknownCoreAttribute));
}

#[test]
fn test_type_mismatch_refined() {
    let doc = read_sedml_from_string(&wrap(
        r#"<listOfSimulations>
    <oneStep id="s" step="fast"/>
  </listOfSimulations>
  <listOfOutputs>
    <plot2D id="p" legend="maybe"/>
  </listOfOutputs>"#,
    ));
    let log = doc.error_log();
    assert!(log.contains(SedErrorCode::OneStepStepMustBeDouble));
    assert!(log.contains(SedErrorCode::PlotLegendMustBeBoolean));
    assert!(!log.contains(SedErrorCode::XmlAttributeTypeMismatch));

    let step = doc.simulation(0).unwrap().as_one_step().unwrap();
    assert!(!step.is_set_step());
}

#[test]
fn test_missing_required_attributes() {
    let doc = read_sedml_from_string(&wrap(
        r#"<listOfTasks>
    <task modelReference="m"/>
  </listOfTasks>
  <listOfOutputs>
    <report id="r">
      <listOfDataSets>
        <dataSet id="d"/>
      </listOfDataSets>
    </report>
  </listOfOutputs>"#,
    ));
    let log = doc.error_log();
    assert!(log.contains(SedErrorCode::TaskAllowedAttributes));
    assert!(log.contains(SedErrorCode::DataSetAllowedAttributes));
    // The partial task is still in the tree
    assert_eq!(doc.task(0).unwrap().model_reference(), Some("m"));
}

#[test]
fn test_invalid_id_syntax_is_kept() {
    let doc = read_sedml_from_string(&wrap(
        r#"<listOfModels>
    <model id="1st"/>
  </listOfModels>"#,
    ));
    assert!(doc.error_log().contains(SedErrorCode::IdSyntaxRule));
    assert_eq!(doc.model(0).unwrap().id(), Some("1st"));
}

#[test]
fn test_empty_list_element() {
    let doc = read_sedml_from_string(&wrap("<listOfModels/>"));
    let errors = doc.error_log().errors_with_code(SedErrorCode::EmptyListElement);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line, 3);
}

#[test]
fn test_bad_level_and_version_values() {
    let doc = read_sedml_from_string(
        r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version3" level="one" version="-3"/>"#,
    );
    let log = doc.error_log();
    assert!(log.contains(SedErrorCode::DocumentLevelMustBeNonNegativeInteger));
    assert!(log.contains(SedErrorCode::DocumentVersionMustBeNonNegativeInteger));
    // The namespace still decides the version
    assert_eq!((doc.level(), doc.version()), (1, 3));
}

#[test]
fn test_root_namespace_checked() {
    let foreign = r#"<sedML xmlns="urn:not-sedml" level="1" version="3"/>"#;

    let strict = read_sedml_from_string(foreign);
    assert!(strict.error_log().contains(SedErrorCode::InvalidNamespaceOnSed));

    let lenient = SedReader::with_config(ReaderConfig::new().with_strict_namespaces(false));
    let doc = lenient.read_from_string(foreign);
    assert_eq!(doc.num_errors(), 0);
    assert_eq!((doc.level(), doc.version()), (1, 3));

    let mismatched = read_sedml_from_string(
        r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version2" level="1" version="3"/>"#,
    );
    assert!(mismatched.error_log().contains(SedErrorCode::InvalidNamespaceOnSed));
}

#[test]
fn test_lenient_namespace_reads_children() {
    let reader = SedReader::with_config(ReaderConfig::new().with_strict_namespaces(false));
    let doc = reader.read_from_string(
        r#"<sedML xmlns="urn:custom" level="1" version="3">
  <listOfModels><model id="m"/></listOfModels>
</sedML>"#,
    );
    assert_eq!(doc.num_models(), 1);
}

#[test]
fn test_default_version_without_attributes_or_namespace() {
    let reader = SedReader::with_config(
        ReaderConfig::new()
            .with_strict_namespaces(false)
            .with_default_version(1, 2),
    );
    let doc = reader.read_from_string("<sedML/>");
    assert_eq!((doc.level(), doc.version()), (1, 2));
    assert!(doc.error_log().contains(SedErrorCode::DocumentAllowedAttributes));
}

#[test]
fn test_duplicate_component_ids() {
    let doc = read_sedml_from_string(&wrap(
        r#"<listOfModels>
    <model id="x"/>
  </listOfModels>
  <listOfTasks>
    <task id="x"/>
  </listOfTasks>"#,
    ));
    let errors = doc.error_log().errors_with_code(SedErrorCode::DuplicateComponentId);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line, 7);
}

#[test]
fn test_undeclared_prefix_skipped() {
    let doc = read_sedml_from_string(&wrap(
        r#"<listOfModels>
    <ext:model id="a"/>
    <model id="b"/>
  </listOfModels>"#,
    ));
    assert!(doc.error_log().contains(SedErrorCode::NsUndeclared));
    assert_eq!(doc.num_models(), 1);
    assert_eq!(doc.model(0).unwrap().id(), Some("b"));
}

#[test]
fn test_foreign_namespace_children_ignored() {
    let doc = read_sedml_from_string(&wrap(
        r#"<listOfDataGenerators>
    <dataGenerator id="dg">
      <annotation xmlns="urn:vendor"><note/></annotation>
      <math xmlns="http://www.w3.org/1998/Math/MathML"><ci>x</ci></math>
    </dataGenerator>
  </listOfDataGenerators>"#,
    ));
    assert_eq!(doc.num_errors(), 0, "{:?}", doc.error_log());
    assert_eq!(doc.num_data_generators(), 1);
    let dg = doc.data_generator(0).unwrap();
    assert!(dg.annotation().is_none());
    assert!(dg.is_set_math());
}

#[test]
fn test_notes_and_annotation_are_not_unrecognized() {
    let doc = read_sedml_from_string(&wrap(
        r#"<notes><p xmlns="http://www.w3.org/1999/xhtml">about</p></notes>
  <annotation><x xmlns="urn:x"/></annotation>
  <listOfModels>
    <model id="m" language="urn:sedml:language:sbml" source="m.xml">
      <notes><p xmlns="http://www.w3.org/1999/xhtml">model</p></notes>
    </model>
  </listOfModels>"#,
    ));
    assert!(!doc.error_log().contains(SedErrorCode::UnrecognizedElement));
    assert_eq!(doc.num_errors(), 0, "{:?}", doc.error_log());
    assert!(doc.is_set_notes());
    assert!(doc.is_set_annotation());
    assert!(doc.model(0).unwrap().is_set_notes());
}

#[test]
fn test_misplaced_notes_reported() {
    let doc = read_sedml_from_string(&wrap(
        r#"<annotation><x xmlns="urn:x"/></annotation>
  <notes><p xmlns="http://www.w3.org/1999/xhtml">late</p></notes>
  <notes><p xmlns="http://www.w3.org/1999/xhtml">again</p></notes>"#,
    ));
    let log = doc.error_log();
    assert!(log.contains(SedErrorCode::NotSchemaConformant));
    assert_eq!(doc.num_errors(), 2, "{:?}", log);
    assert!(doc.notes().unwrap().as_str().contains("again"));
}

#[test]
fn test_duplicate_algorithm_replaces_first() {
    let doc = read_sedml_from_string(&wrap(
        r#"<listOfSimulations>
    <steadyState id="ss">
      <algorithm kisaoID="KISAO:0000019"/>
      <algorithm kisaoID="KISAO:0000282"/>
    </steadyState>
  </listOfSimulations>"#,
    ));
    assert!(doc.error_log().contains(SedErrorCode::SimulationAllowedElements));
    let algorithm = doc.simulation(0).unwrap().algorithm().unwrap();
    assert_eq!(algorithm.kisao_id(), Some("KISAO:0000282"));
}

#[test]
fn test_diagnostics_carry_positions() {
    let doc = read_sedml_from_string(&wrap(
        r#"<listOfModels>
    <model id="m" colour="red"/>
  </listOfModels>"#,
    ));
    let error = doc.error_log().error(0).unwrap();
    assert_eq!(error.line, 4);
    assert!(error.column > 0);
    assert!(error.to_string().contains("colour"));
}
