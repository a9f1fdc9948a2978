//! Tests for flowchart synthesis, labels, rendering and the JSON mirror.
mod common;
use common::*;
use glmp::flowchart::{EdgeStyle, END_NODE_ID, START_NODE_ID, node_label};
use glmp::prelude::*;
use image::{ImageFormat, Rgba, RgbaImage};
use std::ops::Range;
use tempfile::TempDir;

#[test]
fn test_empty_input_yields_start_and_end() {
    let flowchart = FlowchartBuilder::default().synthesize(&[], "Empty");

    assert_eq!(flowchart.nodes.len(), 2);
    assert_eq!(flowchart.edges.len(), 1);
    assert_eq!(flowchart.nodes[0].id, START_NODE_ID);
    assert_eq!(flowchart.nodes[0].kind, NodeKind::Start);
    assert_eq!(flowchart.nodes[1].id, END_NODE_ID);
    assert_eq!(flowchart.nodes[1].kind, NodeKind::End);
    assert_eq!(flowchart.nodes[1].position, (0.0, -1.5));
    assert_eq!(flowchart.edges[0].from_id, START_NODE_ID);
    assert_eq!(flowchart.edges[0].to_id, END_NODE_ID);
    assert!(flowchart.body().is_empty());
}

#[test]
fn test_statements_form_a_chain_in_input_order() {
    let steps = vec![
        step(LogicCategory::Conditional, "When lactose is present"),
        step(LogicCategory::Trigger, "induced by allolactose"),
        step(LogicCategory::Loop, "feedback loop"),
        step(LogicCategory::State, "state of repression"),
        step(LogicCategory::Subroutine, "pathway of lactose uptake"),
    ];
    let flowchart = FlowchartBuilder::default().synthesize(&steps, "Chain");

    assert_eq!(flowchart.nodes.len(), steps.len() + 2);
    assert_eq!(flowchart.edges.len(), steps.len() + 1);

    let ids: Vec<&str> = flowchart.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["start", "elem_1", "elem_2", "elem_3", "elem_4", "elem_5", "end"]
    );
    for (edge, pair) in flowchart.edges.iter().zip(flowchart.nodes.windows(2)) {
        assert_eq!(edge.from_id, pair[0].id);
        assert_eq!(edge.to_id, pair[1].id);
        assert_eq!(edge.style, EdgeStyle::Solid);
        assert!(edge.label.is_empty() && edge.condition.is_empty());
    }

    let kinds: Vec<NodeKind> = flowchart.body().iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Decision,
            NodeKind::Input,
            NodeKind::Process,
            NodeKind::Process,
            NodeKind::Process,
        ]
    );

    // Strictly descending along one vertical axis.
    assert!(flowchart.nodes.iter().all(|n| n.position.0 == 0.0));
    assert!(
        flowchart
            .nodes
            .windows(2)
            .all(|w| w[1].position.1 < w[0].position.1)
    );
}

#[test]
fn test_metadata_counts_nodes_by_kind() {
    let steps = vec![
        step(LogicCategory::Conditional, "if the gate opens then"),
        step(LogicCategory::Conditional, "when the signal fades"),
        step(LogicCategory::Trigger, "triggered by light"),
    ];
    let flowchart = FlowchartBuilder::default().synthesize(&steps, "Counts");
    let metadata = &flowchart.metadata;

    assert_eq!(metadata.total_nodes, 5);
    assert_eq!(metadata.logic_elements_processed, 3);
    assert_eq!(metadata.per_kind.get(&NodeKind::Decision), Some(&2));
    assert_eq!(metadata.per_kind.get(&NodeKind::Input), Some(&1));
    assert_eq!(metadata.per_kind.get(&NodeKind::Start), Some(&1));
    assert_eq!(metadata.per_kind.get(&NodeKind::End), Some(&1));
    assert_eq!(metadata.per_kind.get(&NodeKind::Process), None);
    assert_eq!(metadata.generation_method, "logic_synthesis");
}

#[test]
fn test_label_strips_connectives_and_asks_questions() {
    assert_eq!(
        node_label("When lactose is present", NodeKind::Decision),
        "Is lactose is present?"
    );
    assert_eq!(
        node_label("  provided that the signal persists ", NodeKind::Process),
        "the signal persists"
    );
    assert_eq!(
        node_label("Conditional on nutrient supply", NodeKind::Process),
        "nutrient supply"
    );
    assert_eq!(
        node_label("if the gate is open", NodeKind::Decision),
        "Is the gate is open?"
    );
    assert_eq!(node_label("Has the cell divided", NodeKind::Decision), "Has the cell divided");
    assert_eq!(node_label("triggered by light", NodeKind::Input), "triggered by light");
}

#[test]
fn test_long_labels_are_truncated_to_fifty_characters() {
    let description = "state of sustained transcriptional repression across the whole colony";
    assert!(description.chars().count() > 50);

    let label = node_label(description, NodeKind::Process);
    assert_eq!(label.chars().count(), 50);
    assert!(label.ends_with("..."));
    assert_eq!(&label[..47], &description[..47]);

    let exact = "a".repeat(50);
    assert_eq!(node_label(&exact, NodeKind::Process), exact);
}

#[test]
fn test_lactose_sentence_end_to_end() {
    let extraction = Extractor::default().extract(LACTOSE_SENTENCE, "lactose");
    assert!(extraction.statements_of(LogicCategory::Conditional).count() >= 1);

    let flowchart = FlowchartBuilder::default().synthesize_extraction(&extraction, "Lactose");
    let first = &flowchart.nodes[1];
    assert_eq!(first.kind, NodeKind::Decision);
    assert!(first.label.ends_with('?'));
}

#[test]
fn test_serialize_round_trip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("flowchart.json");
    let steps = vec![
        step(LogicCategory::Conditional, "When lactose is present"),
        step(LogicCategory::Loop, "loop of repeated induction and repression events"),
    ];
    let builder = FlowchartBuilder::default();
    let flowchart = builder.synthesize(&steps, "Round Trip");
    builder.serialize(&flowchart, &path).expect("Failed to serialize");

    let loaded = Flowchart::from_file(&path).expect("Failed to load");
    assert_eq!(loaded.nodes.len(), flowchart.nodes.len());
    assert_eq!(loaded.edges.len(), flowchart.edges.len());
    for (a, b) in loaded.nodes.iter().zip(&flowchart.nodes) {
        assert_eq!(a.label, b.label);
        assert_eq!(a.kind, b.kind);
    }
    assert_eq!(loaded, flowchart);
}

#[test]
fn test_serialized_json_uses_documented_field_names() {
    let flowchart = FlowchartBuilder::default().synthesize(
        &[step(LogicCategory::Trigger, "activated by heat shock")],
        "Fields",
    );
    let json: serde_json::Value = serde_json::from_str(&flowchart.to_json().unwrap()).unwrap();

    assert_eq!(json["title"], "Fields");
    assert_eq!(json["metadata"]["total_elements"], 3);
    assert_eq!(json["metadata"]["element_types"]["input"], 1);
    assert_eq!(json["elements"][0]["element_id"], "start");
    assert_eq!(json["elements"][1]["element_type"], "input");
    assert_eq!(json["elements"][1]["position"], serde_json::json!([0.0, -1.5]));
    assert_eq!(json["elements"][1]["size"], serde_json::json!([1.0, 0.5]));
    assert_eq!(json["connections"][0]["from_element"], "start");
    assert_eq!(json["connections"][0]["to_element"], "elem_1");
    assert_eq!(json["connections"][0]["style"], "solid");
}

#[test]
fn test_render_writes_png_with_vertical_layout() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("flowchart.png");
    let builder = FlowchartBuilder::default();
    let flowchart = builder.synthesize(&[], "Render");
    builder.render(&flowchart, &path).expect("Failed to render");

    let image = image::open(&path).expect("Failed to open image").to_rgba8();
    // 10 units wide; 1 unit margin above start (y = 0) and below end (y = -1.5).
    assert_eq!(image.dimensions(), (600, 210));
    assert_eq!(*image.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    // Inside the start and end ovals, left of their centred labels.
    assert_eq!(*image.get_pixel(260, 60), Rgba([0x90, 0xEE, 0x90, 255]));
    assert_eq!(*image.get_pixel(260, 150), Rgba([0xFF, 0xB6, 0xC1, 255]));
    // The connecting arrow runs down the axis between them.
    assert_eq!(*image.get_pixel(300, 100), Rgba([0, 0, 0, 255]));
}

#[test]
fn test_render_into_missing_directory_fails() {
    let tmp = TempDir::new().unwrap();
    let builder = FlowchartBuilder::default();
    let flowchart = builder.synthesize(&[], "Missing");
    let result = builder.render(&flowchart, tmp.path().join("missing").join("chart.png"));
    assert!(matches!(result, Err(SynthesisError::Render { .. })));
}

fn render_to_image(
    builder: &FlowchartBuilder,
    flowchart: &Flowchart,
    tmp: &TempDir,
    name: &str,
) -> RgbaImage {
    let path = tmp.path().join(name);
    builder.render(flowchart, &path).expect("Failed to render");
    image::open(&path).expect("Failed to open image").to_rgba8()
}

/// Pixels in the given box that differ from `color`.
fn pixels_unlike(image: &RgbaImage, xs: Range<u32>, ys: Range<u32>, color: Rgba<u8>) -> usize {
    ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
        .filter(|&(x, y)| *image.get_pixel(x, y) != color)
        .count()
}

#[test]
fn test_render_draws_node_labels_inside_shapes() {
    let tmp = TempDir::new().unwrap();
    let builder = FlowchartBuilder::default();
    let process_fill = Rgba([0xF0, 0xF8, 0xFF, 255]);

    // The single process node is centred at pixel (300, 150), 120 x 36 pixels.
    let blank = builder.synthesize(&[step(LogicCategory::State, "")], "Blank");
    let image = render_to_image(&builder, &blank, &tmp, "blank.png");
    assert_eq!(pixels_unlike(&image, 250..350, 140..160, process_fill), 0);

    let labelled = builder.synthesize(&[step(LogicCategory::State, "MMMM WWWW")], "Labelled");
    let image = render_to_image(&builder, &labelled, &tmp, "labelled.png");
    assert!(pixels_unlike(&image, 250..350, 140..160, process_fill) > 20);
}

#[test]
fn test_render_draws_title_above_start() {
    let tmp = TempDir::new().unwrap();
    let builder = FlowchartBuilder::default();
    let white = Rgba([255, 255, 255, 255]);

    let untitled = builder.synthesize(&[], "");
    let image = render_to_image(&builder, &untitled, &tmp, "untitled.png");
    assert_eq!(pixels_unlike(&image, 150..450, 2..32, white), 0);

    let titled = builder.synthesize(&[], "Lac Operon Regulation");
    let image = render_to_image(&builder, &titled, &tmp, "titled.png");
    assert!(pixels_unlike(&image, 150..450, 2..32, white) > 20);
}

#[test]
fn test_render_writes_png_regardless_of_extension() {
    let tmp = TempDir::new().unwrap();
    let builder = FlowchartBuilder::default();
    let flowchart = builder.synthesize(&[], "No Extension");

    for name in ["chart", "chart.img"] {
        let path = tmp.path().join(name);
        builder.render(&flowchart, &path).expect("Failed to render");

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!(image.to_rgba8().dimensions(), (600, 210));
    }
}

#[test]
fn test_render_height_is_capped() {
    let tmp = TempDir::new().unwrap();
    let steps = (0..1000)
        .map(|i| step(LogicCategory::State, &format!("state {} of the colony", i)))
        .collect::<Vec<_>>();
    let builder = FlowchartBuilder::default();
    let flowchart = builder.synthesize(&steps, "Long Paper");

    let path = tmp.path().join("long.png");
    builder.render(&flowchart, &path).expect("Failed to render");
    let (width, height) = image::image_dimensions(&path).unwrap();
    assert_eq!(height, builder.render_config().max_height_px);
    assert!(width < 600);
}

#[test]
fn test_render_scales_down_to_configured_height() {
    let tmp = TempDir::new().unwrap();
    let builder = FlowchartBuilder::new(RenderConfig {
        max_height_px: 300,
        ..RenderConfig::default()
    });
    let steps = vec![
        step(LogicCategory::Conditional, "when the signal fades"),
        step(LogicCategory::Trigger, "triggered by light"),
        step(LogicCategory::Loop, "feedback loop"),
        step(LogicCategory::State, "state of repression"),
    ];
    let flowchart = builder.synthesize(&steps, "Scaled");

    // Natural size would be 600 x 570 at 60 pixels per unit.
    let image = render_to_image(&builder, &flowchart, &tmp, "scaled.png");
    assert_eq!(image.height(), 300);
    assert!(image.width() < 600);
}

#[test]
fn test_render_with_unusable_font_fails() {
    let tmp = TempDir::new().unwrap();
    let flowchart = FlowchartBuilder::default().synthesize(&[], "Fonts");

    let missing = FlowchartBuilder::new(RenderConfig {
        font_path: Some(tmp.path().join("missing.ttf")),
        ..RenderConfig::default()
    });
    let result = missing.render(&flowchart, tmp.path().join("a.png"));
    assert!(matches!(result, Err(SynthesisError::Io { .. })));

    let garbage = write_document(tmp.path(), "garbage.ttf", "not a font");
    let invalid = FlowchartBuilder::new(RenderConfig {
        font_path: Some(garbage),
        ..RenderConfig::default()
    });
    let result = invalid.render(&flowchart, tmp.path().join("b.png"));
    assert!(matches!(result, Err(SynthesisError::Render { .. })));
}
