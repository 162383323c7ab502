#[derive(Debug, Clone)]
pub struct LineRecord {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Split `contents` into lines with byte offsets. `end` includes the line terminator.
pub fn split_lines(contents: &str) -> Vec<LineRecord> {
    let mut lines = Vec::new();
    let mut offset = 0usize;

    for segment in contents.split_inclusive('\n') {
        let text = segment
            .strip_suffix('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .unwrap_or(segment);

        lines.push(LineRecord {
            text: text.to_string(),
            start: offset,
            end: offset + segment.len(),
        });

        offset += segment.len();
    }

    lines
}
