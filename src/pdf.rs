// =============================================================================
// PDF Report Renderer
// =============================================================================
//
// Fixed-format analysis report: title, ticker, the user's question, the five
// indicator values, the AI analysis, and a timestamp + disclaimer footer.
// A4 pages, builtin Helvetica, long text word-wrapped with page breaks.

use anyhow::{anyhow, Result};
use chrono::{SecondsFormat, Utc};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};

use crate::indicators::TechnicalIndicators;

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 18.0;
const TOP: f64 = PAGE_HEIGHT - 22.0;
/// Wrap column for 10pt body text inside the margins.
const WRAP_COLUMNS: usize = 95;
/// Approximate Helvetica advance width as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.5;
/// Points to millimetres.
const PT_TO_MM: f64 = 0.352_778;

struct ReportWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f64,
}

impl ReportWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "page 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow!("failed to load Helvetica: {e}"))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| anyhow!("failed to load Helvetica-Bold: {e}"))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: TOP,
        })
    }

    fn break_page_if_needed(&mut self) {
        if self.y < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "page");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP;
        }
    }

    fn line_at(&mut self, text: &str, size: f64, bold: bool, x: f64) {
        self.break_page_if_needed();
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size as f32, Mm(x as f32), Mm(self.y as f32), font);
        self.y -= size * PT_TO_MM * 1.5;
    }

    fn line(&mut self, text: &str, size: f64, bold: bool) {
        self.line_at(text, size, bold, MARGIN);
    }

    /// Horizontally centered single line, estimated from the average
    /// Helvetica glyph width.
    fn centered_line(&mut self, text: &str, size: f64, bold: bool) {
        let text_width = text.chars().count() as f64 * size * GLYPH_WIDTH_RATIO * PT_TO_MM;
        let x = ((PAGE_WIDTH - text_width) / 2.0).max(MARGIN);
        self.line_at(text, size, bold, x);
    }

    fn wrapped(&mut self, text: &str, size: f64) {
        for line in wrap_text(text, WRAP_COLUMNS) {
            self.line(&line, size, false);
        }
    }

    fn gap(&mut self, mm: f64) {
        self.y -= mm;
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| anyhow!("failed to serialize pdf: {e}"))
    }
}

/// Greedy word wrap at `columns` characters. Paragraph breaks in the input
/// are preserved; a word longer than the column width gets its own line.
fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.len() + 1 + word.len() <= columns {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${v}"),
        None => "N/A".to_string(),
    }
}

fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}%"),
        None => "N/A".to_string(),
    }
}

/// Render the analysis report and return the document bytes.
pub fn render_report(
    ticker: &str,
    question: &str,
    ai_analysis: &str,
    indicators: &TechnicalIndicators,
) -> Result<Vec<u8>> {
    let mut writer = ReportWriter::new("StockSense AI — Analysis Report")?;

    writer.centered_line("StockSense AI — Analysis Report", 20.0, true);
    writer.gap(4.0);

    writer.line(&format!("Ticker: {ticker}"), 14.0, true);
    writer.gap(2.0);

    writer.line("User Question:", 12.0, true);
    writer.wrapped(question, 10.0);
    writer.gap(4.0);

    writer.line("Technical Indicators:", 12.0, true);
    writer.line(&format!("SMA 50: {}", format_price(indicators.sma50)), 10.0, false);
    writer.line(
        &format!("SMA 200: {}", format_price(indicators.sma200)),
        10.0,
        false,
    );
    writer.line(
        &format!("Volatility (30d): {}", format_percent(indicators.volatility)),
        10.0,
        false,
    );
    writer.line(
        &format!("Momentum (ROC 14): {}", format_percent(indicators.roc)),
        10.0,
        false,
    );
    writer.line(
        &format!(
            "Relative Strength vs S&P500: {}",
            format_percent(indicators.relative_strength)
        ),
        10.0,
        false,
    );
    writer.gap(4.0);

    writer.line("AI Analysis:", 12.0, true);
    writer.wrapped(ai_analysis, 10.0);
    writer.gap(6.0);

    writer
        .layer
        .set_fill_color(Color::Rgb(Rgb::new(0.5, 0.5, 0.5, None)));
    let generated = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    writer.centered_line(&format!("Generated on {generated}"), 8.0, false);
    writer.centered_line(
        "Data provided for informational purposes only. Not financial advice.",
        8.0,
        false,
    );

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_columns() {
        let text = "one two three four five six seven eight nine ten";
        let lines = wrap_text(text, 12);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.len() <= 12);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_keeps_paragraphs() {
        let lines = wrap_text("first\n\nsecond", 80);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn wrap_long_word_gets_own_line() {
        let lines = wrap_text("short antidisestablishmentarianism end", 10);
        assert!(lines.contains(&"antidisestablishmentarianism".to_string()));
    }

    #[test]
    fn wrap_empty_input() {
        assert_eq!(wrap_text("", 80), vec![String::new()]);
    }

    #[test]
    fn indicator_formatting() {
        assert_eq!(format_price(Some(324.5)), "$324.5");
        assert_eq!(format_price(None), "N/A");
        assert_eq!(format_percent(Some(-1.25)), "-1.25%");
        assert_eq!(format_percent(None), "N/A");
    }

    #[test]
    fn render_produces_pdf_bytes() {
        let indicators = TechnicalIndicators {
            sma50: Some(324.5),
            sma200: Some(249.5),
            volatility: Some(1.02),
            roc: Some(4.18),
            relative_strength: None,
        };
        let long_analysis = "The trend is constructive. ".repeat(200);
        let bytes =
            render_report("AAPL", "Is AAPL a buy here?", &long_analysis, &indicators).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn render_handles_all_null_indicators() {
        let bytes = render_report(
            "NEWCO",
            "Any signal yet?",
            "Insufficient trading history for a technical read.",
            &TechnicalIndicators::default(),
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
