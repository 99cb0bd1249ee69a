//! PDF renderer built on lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use tracing::debug;

use super::fonts::{Font, encode_win_ansi, text_width, wrap_text};
use super::{DocumentRenderer, Result};
use crate::error::RenderError;
use crate::models::config::RenderConfig;
use crate::models::content::{BorderStyle, Cell, ColumnWidth, ContentNode, Table, TextStyle};

const BLACK: [f32; 3] = [0.0, 0.0, 0.0];
const GRAY: [f32; 3] = [0.33, 0.33, 0.33];
const LINK: [f32; 3] = [0.0, 0.2, 0.7];

/// Inner cell padding.
const CELL_PADDING: f32 = 3.0;
/// Narrowest width a `Star` column shrinks to before the table is scaled.
const MIN_STAR_WIDTH: f32 = 40.0;

/// Renders content trees to A4 PDF with the standard Helvetica fonts.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    config: RenderConfig,
}

impl PdfRenderer {
    /// Create a renderer with the given configuration.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Rendering configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn assemble(&self, pages: Vec<Vec<Operation>>) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let font_id = |doc: &mut Document, font: Font| -> ObjectId {
            doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            })
        };
        let regular_id = font_id(&mut doc, Font::Regular);
        let bold_id = font_id(&mut doc, Font::Bold);
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => Object::Reference(regular_id),
                "F2" => Object::Reference(bold_id),
            },
        });

        let mut kids = Vec::with_capacity(pages.len());
        for operations in pages {
            let encoded = Content { operations }
                .encode()
                .map_err(|e| RenderError::Content(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "Contents" => Object::Reference(content_id),
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
            "Resources" => Object::Reference(resources_id),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.config.page_width),
                Object::Real(self.config.page_height),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));
        let info_id = doc.add_object(dictionary! {
            "Producer" => Object::string_literal("ksef-pdf"),
        });
        doc.trailer.set("Info", Object::Reference(info_id));

        if self.config.compress {
            doc.compress();
        }

        let mut output = Vec::new();
        doc.save_to(&mut output)
            .map_err(|e| RenderError::Write(e.to_string()))?;
        debug!("Rendered {} page(s), {} bytes", count, output.len());
        Ok(output)
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, content: &ContentNode) -> Result<Vec<u8>> {
        let mut layout = Layout::new(&self.config);
        layout.node(content, 0);
        self.assemble(layout.finish())
    }
}

/// Resolved look of a run of text.
#[derive(Debug, Clone, Copy)]
struct Look {
    font: Font,
    size: f32,
    color: [f32; 3],
    space_before: f32,
}

impl Look {
    fn resolve(styles: &[TextStyle], config: &RenderConfig) -> Self {
        let mut look = Look {
            font: Font::Regular,
            size: config.font_size,
            color: BLACK,
            space_before: 0.0,
        };
        for style in styles {
            match style {
                TextStyle::Default => {}
                TextStyle::Title => {
                    look.font = Font::Bold;
                    look.size = config.title_font_size;
                    look.space_before = config.font_size;
                }
                TextStyle::Label => {
                    look.font = Font::Bold;
                    look.size = config.font_size + 1.0;
                }
                TextStyle::LabelMargin => look.space_before = config.font_size,
                TextStyle::GrayBoldTitle => {
                    look.font = Font::Bold;
                    look.color = GRAY;
                }
                TextStyle::Bold => look.font = Font::Bold,
                TextStyle::Small => look.size = (config.font_size - 1.5).max(4.0),
                TextStyle::Link => look.color = LINK,
            }
        }
        look
    }

    fn line_height(&self, config: &RenderConfig) -> f32 {
        self.size * config.line_spacing
    }
}

/// Page-by-page layout state. `y` is the top of the free area.
struct Layout<'a> {
    config: &'a RenderConfig,
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    y: f32,
}

impl<'a> Layout<'a> {
    fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            ops: Vec::new(),
            y: config.page_height - config.margin,
        }
    }

    fn left(&self) -> f32 {
        self.config.margin
    }

    fn width(&self) -> f32 {
        self.config.page_width - 2.0 * self.config.margin
    }

    fn bottom(&self) -> f32 {
        self.config.margin
    }

    fn top(&self) -> f32 {
        self.config.page_height - self.config.margin
    }

    fn ensure_space(&mut self, height: f32) {
        // A block taller than a page starts on a fresh one and then overflows.
        if self.y - height < self.bottom() && self.y < self.top() {
            self.new_page();
        }
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.ops));
        self.y = self.top();
    }

    fn gap(&mut self, height: f32) {
        if self.y < self.top() {
            self.y -= height;
        }
    }

    fn node(&mut self, node: &ContentNode, depth: usize) {
        match node {
            ContentNode::Section { title, children } => {
                if depth > 0 {
                    self.heading(title, depth);
                }
                for child in children {
                    self.node(child, depth + 1);
                }
            }
            ContentNode::Table(table) => {
                self.table(table);
                self.gap(self.config.font_size * 0.5);
            }
            ContentNode::LabelText { label, value } => self.label_text(label, value),
            ContentNode::FormattedText { text, styles } => {
                let look = Look::resolve(styles, self.config);
                self.paragraph(text, look);
            }
        }
    }

    fn heading(&mut self, title: &str, depth: usize) {
        let size = if depth == 1 {
            self.config.header_font_size
        } else {
            self.config.font_size + 1.0
        };
        let look = Look {
            font: Font::Bold,
            size,
            color: BLACK,
            space_before: size * 0.8,
        };
        let line_height = look.line_height(self.config);

        self.gap(look.space_before);
        self.ensure_space(line_height * 2.0);
        let baseline = self.y - size;
        self.text(self.left(), baseline, look, title);
        self.y -= line_height;

        if depth == 1 {
            let y = self.y + line_height - size - 2.0;
            self.rule(self.left(), y, self.left() + self.width(), y);
        }
    }

    fn paragraph(&mut self, text: &str, look: Look) {
        self.gap(look.space_before);
        let line_height = look.line_height(self.config);
        for line in wrap_text(text, look.font, look.size, self.width()) {
            self.ensure_space(line_height);
            let baseline = self.y - look.size;
            self.text(self.left(), baseline, look, &line);
            self.y -= line_height;
        }
    }

    fn label_text(&mut self, label: &str, value: &str) {
        let base = Look::resolve(&[TextStyle::Default], self.config);
        let bold = Look {
            font: Font::Bold,
            ..base
        };
        let line_height = base.line_height(self.config);

        let label_width = text_width(label, Font::Bold, base.size).min(self.width() * 0.5);
        let value_x = self.left() + label_width;
        let lines = wrap_text(value, base.font, base.size, self.width() - label_width);

        for (index, line) in lines.iter().enumerate() {
            self.ensure_space(line_height);
            let baseline = self.y - base.size;
            if index == 0 {
                self.text(self.left(), baseline, bold, label);
            }
            self.text(value_x, baseline, base, line);
            self.y -= line_height;
        }
    }

    fn table(&mut self, table: &Table) {
        let columns = table.column_count();
        if columns == 0 {
            return;
        }
        let widths = self.column_widths(table, columns);
        let empty = Cell::text("");

        for (index, row) in table.rows.iter().enumerate() {
            let cells: Vec<(Look, Vec<String>)> = (0..columns)
                .map(|column| {
                    let cell = row.get(column).unwrap_or(&empty);
                    let look = Look::resolve(&cell.styles, self.config);
                    let inner = (widths[column] - 2.0 * CELL_PADDING).max(1.0);
                    (look, wrap_text(&cell.text, look.font, look.size, inner))
                })
                .collect();

            let height = cells
                .iter()
                .map(|(look, lines)| lines.len() as f32 * look.line_height(self.config))
                .fold(0.0, f32::max)
                + 2.0 * CELL_PADDING;
            self.ensure_space(height);

            let mut x = self.left();
            for ((look, lines), width) in cells.iter().zip(&widths) {
                let mut baseline = self.y - CELL_PADDING - look.size;
                for line in lines {
                    self.text(x + CELL_PADDING, baseline, *look, line);
                    baseline -= look.line_height(self.config);
                }
                if table.border == BorderStyle::Grid {
                    self.cell_border(x, self.y - height, *width, height);
                }
                x += width;
            }

            if table.border == BorderStyle::HeaderLine && index == 0 {
                let y = self.y - height;
                self.rule(self.left(), y, x, y);
            }
            self.y -= height;
        }
    }

    /// Resolve relative widths to points, scaling down when the natural
    /// widths exceed the page.
    fn column_widths(&self, table: &Table, columns: usize) -> Vec<f32> {
        let available = self.width();
        let specs: Vec<ColumnWidth> = (0..columns)
            .map(|column| table.widths.get(column).copied().unwrap_or(ColumnWidth::Star))
            .collect();

        let natural = |column: usize| -> f32 {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(column))
                .map(|cell| {
                    let look = Look::resolve(&cell.styles, self.config);
                    text_width(&cell.text, look.font, look.size)
                })
                .fold(0.0, f32::max)
                + 2.0 * CELL_PADDING
        };

        let mut widths: Vec<f32> = specs
            .iter()
            .enumerate()
            .map(|(column, spec)| match spec {
                ColumnWidth::Fixed(width) => *width,
                ColumnWidth::Auto => natural(column),
                ColumnWidth::Star => 0.0,
            })
            .collect();

        let stars = specs
            .iter()
            .filter(|spec| matches!(spec, ColumnWidth::Star))
            .count();
        let used: f32 = widths.iter().sum();
        if stars > 0 {
            let share = ((available - used) / stars as f32).max(MIN_STAR_WIDTH);
            for (width, spec) in widths.iter_mut().zip(&specs) {
                if matches!(spec, ColumnWidth::Star) {
                    *width = share;
                }
            }
        }

        let total: f32 = widths.iter().sum();
        if total > available {
            let factor = available / total;
            widths.iter_mut().for_each(|width| *width *= factor);
        }
        widths
    }

    fn text(&mut self, x: f32, y: f32, look: Look, text: &str) {
        if text.is_empty() {
            return;
        }
        let [r, g, b] = look.color;
        self.ops.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(look.font.resource_name().to_vec()),
                    Object::Real(look.size),
                ],
            ),
            Operation::new("rg", vec![Object::Real(r), Object::Real(g), Object::Real(b)]),
            Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Hexadecimal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    fn stroke_color(&mut self) {
        let [r, g, b] = self.config.table_border_color.map(|c| f32::from(c) / 255.0);
        self.ops.extend([
            Operation::new("RG", vec![Object::Real(r), Object::Real(g), Object::Real(b)]),
            Operation::new("w", vec![Object::Real(0.5)]),
        ]);
    }

    fn cell_border(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.stroke_color();
        self.ops.extend([
            Operation::new(
                "re",
                vec![
                    Object::Real(x),
                    Object::Real(y),
                    Object::Real(width),
                    Object::Real(height),
                ],
            ),
            Operation::new("S", vec![]),
        ]);
    }

    fn rule(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.stroke_color();
        self.ops.extend([
            Operation::new("m", vec![Object::Real(x1), Object::Real(y1)]),
            Operation::new("l", vec![Object::Real(x2), Object::Real(y2)]),
            Operation::new("S", vec![]),
        ]);
    }

    /// Close the last page and stamp page numbers.
    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.new_page();
        }

        let total = self.pages.len();
        let look = Look {
            font: Font::Regular,
            size: (self.config.font_size - 1.0).max(4.0),
            color: GRAY,
            space_before: 0.0,
        };
        let label = |page: usize| format!("Strona {} z {}", page, total);
        let right = self.config.page_width - self.config.margin;
        let baseline = self.config.margin / 2.0;

        let mut pages = std::mem::take(&mut self.pages);
        for (index, operations) in pages.iter_mut().enumerate() {
            let text = label(index + 1);
            let x = right - text_width(&text, look.font, look.size);
            std::mem::swap(&mut self.ops, operations);
            self.text(x, baseline, look, &text);
            std::mem::swap(&mut self.ops, operations);
        }
        pages
    }
}
