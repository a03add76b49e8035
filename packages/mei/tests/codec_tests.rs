//! Zone codec and document round trips

use facsimile_mei::{
    annotation_to_zone, annotation_to_zone_element, pages_from_document, zone_to_annotation,
    Annotation, Bounds, CodecError, MeiDocument, WebAnnotation, Zone,
};
use proptest::prelude::*;

const SAMPLE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<mei xmlns="http://www.music-encoding.org/ns/mei" meiversion="5.0">
  <music>
    <facsimile>
      <surface xml:id="s1" lrx="2000" lry="3000">
        <graphic target="https://example.org/iiif/p1/full/full/0/default.jpg" width="2000" height="3000"/>
        <zone xml:id="z1" ulx="10" uly="10" lrx="50" lry="50"/>
      </surface>
      <surface xml:id="s2" lrx="2000" lry="3000">
        <graphic target="https://example.org/iiif/p2/full/full/0/default.jpg" width="2000" height="3000"/>
      </surface>
    </facsimile>
    <body>
      <mdiv>
        <score>
          <section>
            <measure xml:id="m1" n="1" facs="#z1"/>
          </section>
        </score>
      </mdiv>
    </body>
  </music>
</mei>
"##;

fn zone_strategy() -> impl Strategy<Value = Zone> {
    ("[a-z][a-z0-9-]{0,12}", 0u32..10_000, 0u32..10_000, 1u32..5_000, 1u32..5_000).prop_map(
        |(id, ulx, uly, w, h)| Zone {
            id,
            ulx,
            uly,
            lrx: ulx + w,
            lry: uly + h,
        },
    )
}

proptest! {
    #[test]
    fn zone_survives_decode_then_encode(zone in zone_strategy()) {
        let annotation = zone_to_annotation(&zone.to_element(), "page.jpg").unwrap();
        let encoded = annotation_to_zone(&annotation).unwrap();
        prop_assert_eq!(encoded, zone);
    }

    #[test]
    fn annotation_survives_web_annotation_json(zone in zone_strategy()) {
        let annotation = Annotation::new(zone.id.clone(), zone.bounds(), "page.jpg");
        let json = serde_json::to_string(&annotation.to_web_annotation()).unwrap();
        let web: WebAnnotation = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(Annotation::from_web_annotation(&web).unwrap(), annotation);
    }
}

#[test]
fn test_decode_zone_from_parsed_document() {
    let doc = MeiDocument::parse(SAMPLE).unwrap();
    let zones = doc.zones_on_surface(1).unwrap();
    assert_eq!(zones.len(), 1);

    let annotation = zone_to_annotation(zones[0], "page-1").unwrap();
    assert_eq!(annotation.id.as_deref(), Some("z1"));
    assert_eq!(annotation.bounds, Bounds::from_corners(10, 10, 50, 50));
    assert_eq!(annotation.page_uri, "page-1");
}

#[test]
fn test_encoded_zone_serializes_as_mei() {
    let annotation = Annotation::new("z9", Bounds::new(5, 6, 7, 8), "page-1");
    let element = annotation_to_zone_element(&annotation).unwrap();
    assert_eq!(
        facsimile_mei::serializer::element_to_string(&element).unwrap(),
        r#"<zone xml:id="z9" ulx="5" uly="6" lrx="12" lry="14"/>"#
    );
}

#[test]
fn test_sample_round_trips_and_lists_pages() {
    let doc = MeiDocument::parse(SAMPLE).unwrap();
    assert_eq!(doc.to_xml_string().unwrap(), SAMPLE);

    let pages = pages_from_document(&doc).unwrap();
    assert_eq!(pages.len(), 2);
    assert!(pages[1].uri.contains("/p2/"));
    assert_eq!(doc.measures()[0].facs, vec!["z1"]);
}

#[test]
fn test_corner_past_pixel_range_is_rejected() {
    let wide = Annotation::new("z1", Bounds::new(4_294_967_290, 0, 10, 10), "page-1");
    assert_eq!(
        annotation_to_zone(&wide),
        Err(CodecError::CoordinateOverflow {
            zone: "z1".to_string(),
            attribute: "lrx"
        })
    );

    let tall = Annotation::new("z2", Bounds::new(0, u32::MAX, 1, 1), "page-1");
    assert!(matches!(
        annotation_to_zone_element(&tall),
        Err(CodecError::CoordinateOverflow { attribute: "lry", .. })
    ));

    // A fragment clamps huge values to u32::MAX, which still overflows once widened
    let clamped = Bounds::parse_fragment("xywh=pixel:1e12,0,5,5").unwrap();
    assert!(annotation_to_zone(&Annotation::new("z3", clamped, "page-1")).is_err());
}
