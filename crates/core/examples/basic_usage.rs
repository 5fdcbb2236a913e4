//! Basic usage example of the reconcile_core library

use reconcile_core::smart_insert::line_at;
use reconcile_core::{compute_views, DiffEngine, Granularity, LineStatus, MergeConfig, ViewMode};

const LINE: &str = "----------------------------------------";

fn main() {
    println!("=== Merge View Examples ===\n");

    // Example 1: Views with the default configuration
    example_views();

    // Example 2: Character granularity
    example_character_granularity();

    // Example 3: Line statuses and paragraph markers
    example_snapshot();

    // Example 4: Building the merge buffer
    example_merge_buffer();
}

fn example_views() {
    println!("Example 1: Default, Hover and Complete Views");
    println!("{}", LINE);

    let original = "Hello World! This is a test.";
    let modified = "Hello Rust! This is a test.";

    let views = compute_views(original, modified, None);

    for mode in [ViewMode::Default, ViewMode::Hover, ViewMode::Complete] {
        let pair = views.get(mode);
        println!("{:?}", mode);
        println!("  left:  {}", pair.left.text());
        println!("  right: {}", pair.right.text());
    }
    println!("\n");
}

fn example_character_granularity() {
    println!("Example 2: Character Granularity");
    println!("{}", LINE);

    let config = MergeConfig::default().with_granularity(Granularity::Character);
    let engine = DiffEngine::new(config);

    let script = engine.diff("colour", "color");
    println!("Script: {}", script);

    let stats = script.statistics();
    println!("Change ratio: {:.2}", stats.change_ratio());
    println!("\n");
}

fn example_snapshot() {
    println!("Example 3: Line Statuses and Paragraph Markers");
    println!("{}", LINE);

    let original = "First paragraph.\nSecond line.";
    let modified = "First paragraph.\n\nSecond line, edited.";

    let snapshot = DiffEngine::default().snapshot(original, modified);

    for (index, status) in snapshot.lines.original.iter() {
        if status != LineStatus::Unchanged {
            println!("  original line {}: {:?}", index + 1, status);
        }
    }
    for (index, status) in snapshot.lines.modified.iter() {
        if status != LineStatus::Unchanged {
            println!("  modified line {}: {:?}", index + 1, status);
        }
    }

    println!("Richer side: {:?}", snapshot.paragraphs.richer_side);
    for marker in &snapshot.paragraphs.markers {
        println!(
            "  ¶{} at left {} / right {}",
            marker.number, marker.left_pos, marker.right_pos
        );
    }
    println!("\n");
}

fn example_merge_buffer() {
    println!("Example 4: Building the Merge Buffer");
    println!("{}", LINE);

    let engine = DiffEngine::default();
    let source = "Intro line.\n\nA fresh paragraph.";
    let mut history = engine.new_history("Draft opening.");

    let cursor = source.find("fresh").unwrap_or_default();
    if let Some(line) = line_at(source, cursor) {
        println!("Copying: {:?}", line.text);
    }

    let target = history.current().to_string();
    let end = target.len();
    if let Some(splice) = engine.copy_line(source, cursor, &target, end..end) {
        history.record(splice.text);
    }

    println!("Merge buffer:\n{}", history.current());
    if let Some(previous) = history.undo() {
        println!("After undo:\n{}", previous);
    }
}
