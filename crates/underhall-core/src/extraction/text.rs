use crate::extraction::graph::BlockGraph;
use crate::model::BlockType;
use crate::parsing::normalize::normalize;

/// Plain text of a page: every LINE block on its own line, in document order,
/// with Swedish OCR artifacts repaired.
pub fn extract_text(graph: &BlockGraph<'_>) -> String {
    let mut text = String::new();
    for line in graph.blocks_of_type(BlockType::Line) {
        if let Some(t) = line.text.as_deref() {
            text.push_str(t);
        }
        text.push('\n');
    }
    normalize(&text)
}
