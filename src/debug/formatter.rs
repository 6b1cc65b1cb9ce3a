//! Pure formatting: turns numbers into aligned strings and rows/columns of
//! strings into a single block of text. No I/O, no machine access.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Binary,
    Hex,
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Byte,
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderingDirection {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    pub numbers: Representation,
    pub output_as: Resolution,
    pub rendering: RenderingDirection,
}

impl Formatter {
    pub fn new(numbers: Representation, output_as: Resolution, rendering: RenderingDirection) -> Self {
        Self {
            numbers,
            output_as,
            rendering,
        }
    }

    /// The fixed field width an address column is padded to under this
    /// formatter's numeral system and resolution.
    pub fn position_width(&self) -> usize {
        match (self.numbers, self.output_as) {
            (Representation::Binary, Resolution::Byte) => 10,
            (Representation::Binary, Resolution::Word) => 18,
            (Representation::Decimal, Resolution::Byte) => 3,
            (Representation::Decimal, Resolution::Word) => 5,
            (Representation::Hex, _) => 4,
        }
    }

    pub fn format_position(&self, position: u16) -> String {
        format!("{:>width$}", position, width = self.position_width())
    }

    pub fn format_byte(&self, value: u8) -> String {
        match self.numbers {
            Representation::Binary => format!("{:#010b}", value),
            Representation::Hex => format!("{:#04x}", value),
            Representation::Decimal => format!("{:3}", value),
        }
    }

    pub fn format_word(&self, value: u16) -> String {
        match self.numbers {
            Representation::Binary => format!("{:#018b}", value),
            Representation::Hex => format!("{:#06x}", value),
            Representation::Decimal => format!("{:05}", value),
        }
    }

    /// Right-pads `label` with spaces if `value` renders wider than it.
    pub fn align_label(label: &str, value: &str) -> String {
        if value.len() > label.len() {
            format!("{label:<width$}", width = value.len())
        } else {
            label.to_string()
        }
    }

    pub fn stitch(&self, first: &[String], rest: &[Vec<String>]) -> String {
        match self.rendering {
            RenderingDirection::Horizontal => Self::stitch_rows(first, rest),
            RenderingDirection::Vertical => Self::stitch_cols(first, rest),
        }
    }

    fn stitch_rows(first: &[String], rest: &[Vec<String>]) -> String {
        let first_line = first.join(" ");
        let separator = "-".repeat(first_line.chars().count());
        let mut lines = vec![first_line];
        for row in rest {
            lines.push(row.join(" "));
        }
        lines.join(&format!("\n{separator}\n"))
    }

    fn stitch_cols(first: &[String], rest: &[Vec<String>]) -> String {
        let mut rows = Vec::with_capacity(first.len());
        for (row_idx, item) in first.iter().enumerate() {
            let mut cols = vec![item.clone()];
            let mut width = item.len();
            for col in rest {
                if let Some(cell) = col.get(row_idx) {
                    width = cell.len();
                    cols.push(cell.clone());
                } else {
                    cols.push(" ".repeat(width));
                }
            }
            rows.push(cols.join(" | "));
        }
        rows.join("\n")
    }
}
