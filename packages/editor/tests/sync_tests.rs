//! Zone sync, snapshots and ingestion

use facsimile_editor::{
    create_zone, update_zone, Annotation, Bounds, DocumentStore, EditorError, IngestError,
    Ingested, MeiDocument, Page, ZoneAttachment,
};
use facsimile_mei::IdGenerator;

const LINKED: &str = r##"<mei>
  <music>
    <facsimile>
      <surface>
        <graphic target="p1.jpg" width="1000"/>
        <zone xml:id="a" ulx="0" uly="0" lrx="10" lry="10"/>
      </surface>
      <surface>
        <graphic target="p2.jpg" width="1000"/>
        <zone xml:id="b" ulx="0" uly="0" lrx="10" lry="10" type="staff"/>
      </surface>
    </facsimile>
    <body><mdiv><score><section>
      <measure xml:id="ma" n="1" facs="#a"/>
      <measure xml:id="mb" n="2" facs="#b"/>
    </section></score></mdiv></body>
  </music>
</mei>"##;

fn annotation(id: &str, x: u32) -> Annotation {
    Annotation::new(id, Bounds::new(x, 20, 30, 30), "p.jpg")
}

fn linked() -> MeiDocument {
    MeiDocument::parse(LINKED).unwrap()
}

fn facs_of(doc: &MeiDocument, measure_id: &str) -> Vec<String> {
    doc.measure(measure_id).unwrap().facs
}

#[test]
fn test_single_mode_places_measure_by_page() {
    let doc = linked();
    let mut ids = IdGenerator::from_seed("t");

    let created = create_zone(&doc, 1, &annotation("new", 100), &ZoneAttachment::Single, None, &mut ids)
        .unwrap();

    let order: Vec<_> = created
        .document
        .measures()
        .into_iter()
        .map(|m| m.id.unwrap_or_default())
        .collect();
    let new_measure = created.measure_id.unwrap();
    assert_eq!(order, vec!["ma".to_string(), new_measure.clone(), "mb".to_string()]);
    assert_eq!(facs_of(&created.document, &new_measure), vec!["new"]);
    assert_eq!(created.attachment, ZoneAttachment::Single);

    // Source document is untouched
    assert_eq!(doc.measures().len(), 2);
    assert!(doc.zone("new").is_none());
}

#[test]
fn test_multi_mode_joins_measure_of_selected_zone() {
    let doc = linked();
    let mut ids = IdGenerator::from_seed("t");
    let multi = ZoneAttachment::Single.toggled(None);

    let first = create_zone(&doc, 2, &annotation("c", 100), &multi, Some("a"), &mut ids).unwrap();
    assert_eq!(first.measure_id.as_deref(), Some("ma"));
    assert_eq!(
        first.attachment,
        ZoneAttachment::MultiOpen {
            open_measure: Some("ma".to_string())
        }
    );

    let second = create_zone(&first.document, 2, &annotation("d", 200), &first.attachment, None, &mut ids)
        .unwrap();
    assert_eq!(second.measure_id.as_deref(), Some("ma"));
    assert_eq!(facs_of(&second.document, "ma"), vec!["a", "c", "d"]);
    assert_eq!(facs_of(&second.document, "mb"), vec!["b"]);
    assert_eq!(second.document.measures().len(), 2);
}

#[test]
fn test_multi_mode_without_selection_joins_last_measure() {
    let doc = linked();
    let mut ids = IdGenerator::from_seed("t");
    let multi = ZoneAttachment::MultiOpen { open_measure: None };

    let created = create_zone(&doc, 1, &annotation("c", 100), &multi, None, &mut ids).unwrap();

    assert_eq!(created.measure_id.as_deref(), Some("mb"));
    assert_eq!(facs_of(&created.document, "mb"), vec!["b", "c"]);
}

#[test]
fn test_multi_mode_on_empty_score_creates_measure() {
    let doc = MeiDocument::parse(
        r#"<mei><music><facsimile><surface/></facsimile></music></mei>"#,
    )
    .unwrap();
    let mut ids = IdGenerator::from_seed("t");
    let multi = ZoneAttachment::MultiOpen { open_measure: None };

    let first = create_zone(&doc, 1, &annotation("z1", 0), &multi, None, &mut ids).unwrap();
    let measure_id = first.measure_id.clone().unwrap();
    let second =
        create_zone(&first.document, 1, &annotation("z2", 50), &first.attachment, None, &mut ids).unwrap();

    assert_eq!(second.document.measures().len(), 1);
    assert_eq!(facs_of(&second.document, &measure_id), vec!["z1", "z2"]);

    let xml = second.document.to_xml_string().unwrap();
    assert!(xml.contains("<body><mdiv><score><section><measure"));
}

#[test]
fn test_unassigned_annotation_gets_fresh_id() {
    let doc = linked();
    let mut ids = IdGenerator::from_seed("t");
    let unassigned = Annotation::unassigned(Bounds::new(1, 1, 5, 5), "p1.jpg");

    let created = create_zone(&doc, 1, &unassigned, &ZoneAttachment::Single, None, &mut ids).unwrap();

    assert!(created.zone_id.starts_with("zone-"));
    assert!(created.document.zone(&created.zone_id).is_some());
    assert_ne!(created.measure_id.as_deref(), Some(created.zone_id.as_str()));
}

#[test]
fn test_duplicate_zone_id_rejected() {
    let doc = linked();
    let mut ids = IdGenerator::from_seed("t");

    let err = create_zone(&doc, 1, &annotation("b", 0), &ZoneAttachment::Single, None, &mut ids)
        .unwrap_err();
    assert!(matches!(err, EditorError::DuplicateZoneId(ref id) if id == "b"));
}

#[test]
fn test_degenerate_bounds_rejected() {
    let doc = linked();
    let mut ids = IdGenerator::from_seed("t");
    let flat = Annotation::new("flat", Bounds::new(5, 5, 0, 10), "p1.jpg");

    let err = create_zone(&doc, 1, &flat, &ZoneAttachment::Single, None, &mut ids).unwrap_err();
    assert!(matches!(err, EditorError::Codec(_)));
}

#[test]
fn test_update_keeps_other_attributes() {
    let doc = linked();

    let next = update_zone(&doc, 2, &Annotation::new("b", Bounds::new(5, 6, 7, 8), "p2.jpg")).unwrap();

    let zone = next.zone_element("b").unwrap();
    assert_eq!(zone.attribute("type"), Some("staff"));
    assert_eq!(zone.attribute("lrx"), Some("12"));
    assert_eq!(zone.attribute("lry"), Some("14"));
    assert_eq!(facs_of(&next, "mb"), vec!["b"]);
}

#[test]
fn test_update_zone_on_wrong_page_fails() {
    let doc = linked();
    let err = update_zone(&doc, 1, &Annotation::new("b", Bounds::new(5, 6, 7, 8), "p1.jpg")).unwrap_err();
    assert!(err.is_structural());

    let err = update_zone(&doc, 9, &Annotation::new("b", Bounds::new(5, 6, 7, 8), "p9.jpg")).unwrap_err();
    assert!(err.is_structural());
}

#[test]
fn test_multi_mode_opens_most_recently_inserted_measure() {
    let mut store = DocumentStore::with_id_seed("recent");
    store.load_xml(LINKED).unwrap();

    // Placed between ma and mb, so it is not the last measure in the score
    let inserted = store.create_zone(annotation("c", 100)).unwrap().measure_id.unwrap();
    store.toggle_multi_zone_mode();
    let joined = store.create_zone(annotation("d", 200)).unwrap();

    assert_eq!(joined.measure_id.as_deref(), Some(inserted.as_str()));
    let snapshot = store.snapshot().unwrap();
    assert_eq!(facs_of(&snapshot, &inserted), vec!["c", "d"]);
    assert_eq!(facs_of(&snapshot, "mb"), vec!["b"]);
}

#[test]
fn test_snapshot_survives_swap() {
    let mut store = DocumentStore::with_id_seed("snap");
    store.load_xml(LINKED).unwrap();
    let before = store.snapshot().unwrap();
    let version = store.version();

    store.create_zone(annotation("c", 100)).unwrap();

    assert!(before.zone("c").is_none());
    assert_eq!(before.measures().len(), 2);
    assert!(store.snapshot().unwrap().zone("c").is_some());
    assert_eq!(store.version(), version + 1);
}

#[test]
fn test_failed_edit_keeps_version() {
    let mut store = DocumentStore::with_id_seed("snap");
    store.load_xml(LINKED).unwrap();
    let version = store.version();

    assert!(store.create_zone(annotation("a", 0)).is_err());
    assert_eq!(store.version(), version);
    assert_eq!(store.all_measures().len(), 2);
}

#[tokio::test]
async fn test_ingest_success() {
    let mut store = DocumentStore::new();
    store.set_modal(Some("import".to_string()));

    store
        .ingest(async { Ingested::from_xml(LINKED) })
        .await
        .unwrap();

    assert!(store.is_ready());
    assert!(!store.is_loading());
    assert!(!store.is_processing());
    assert_eq!(store.active_modal(), None);
    assert_eq!(
        store.pages(),
        &[Page::new("p1.jpg", 1000), Page::new("p2.jpg", 1000)]
    );
    assert_eq!(store.current_page_zero_based(), Some(0));
}

#[tokio::test]
async fn test_ingest_failure_leaves_store_empty() {
    let mut store = DocumentStore::new();

    let result = store
        .ingest(async { Err(IngestError::NotAManifest("missing @context".to_string())) })
        .await;

    assert!(matches!(result, Err(EditorError::Ingest(IngestError::NotAManifest(_)))));
    assert!(!store.is_ready());
    assert!(!store.is_loading());
    assert!(!store.is_processing());
    assert!(store.last_ingest_error().unwrap().contains("missing @context"));
}
