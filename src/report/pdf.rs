use std::path::Path;

use anyhow::{Context, Result};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};
use tracing::info;

use crate::config::{AnalysisSettings, Config};
use crate::models::{Analysis, TermDefinition, TermMatch};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 18.0;
const BOTTOM: f32 = 26.0; // content never goes below the footer rule
const COVER_HDR_H: f32 = 72.0;
const T_END: f32 = PAGE_W - MARGIN;

// ── Colour palette ────────────────────────────────────────────────────────────
const BG:           (f32, f32, f32) = (1.00, 1.00, 1.00);
const PANEL:        (f32, f32, f32) = (1.00, 1.00, 1.00);
const PANEL_ALT:    (f32, f32, f32) = (0.95, 0.96, 0.99);
const PANEL_BORDER: (f32, f32, f32) = (0.85, 0.87, 0.92);
const ACCENT_BLU:   (f32, f32, f32) = (0.20, 0.46, 0.95);
const ACCENT_PUR:   (f32, f32, f32) = (0.52, 0.30, 0.95);
const TEXT_PRI:     (f32, f32, f32) = (0.07, 0.08, 0.14);
const TEXT_SEC:     (f32, f32, f32) = (0.36, 0.40, 0.52);
const TEXT_MUT:     (f32, f32, f32) = (0.58, 0.63, 0.72);
const WHITE:        (f32, f32, f32) = (1.00, 1.00, 1.00);
const WHITE_DIM:    (f32, f32, f32) = (0.82, 0.89, 1.00);
const FLAG_BG:      (f32, f32, f32) = (1.00, 0.91, 0.91);
const FLAG_FG:      (f32, f32, f32) = (0.76, 0.09, 0.13);

const R_PANEL: f32 = 2.5;
const R_BADGE: f32 = 1.5;

const LINE_H: f32 = 4.6;
const CLAUSE_WRAP: usize = 100;
const TEXT_WRAP: usize = 110;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render a PDF report: cover page with overview → one section per matched term.
pub fn render(
    analysis: &Analysis,
    config: &Config,
    settings: &AnalysisSettings,
    output_path: &Path,
) -> Result<()> {
    let doc = PdfDocument::empty("Legal Document Analysis");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };

    add_cover_page(&doc, &fonts, analysis, config);

    if !analysis.classification.is_empty() {
        let mut cursor = Cursor::new_page(&doc, &fonts);
        for m in &analysis.classification {
            if let Some(term) = config.term(&m.term) {
                add_term_section(&mut cursor, term, m, settings);
            }
        }
    }

    let bytes = doc.save_to_bytes()?;
    std::fs::write(output_path, &bytes)
        .with_context(|| format!("Failed to write PDF to {}", output_path.display()))?;

    info!(path = %output_path.display(), bytes = bytes.len(), "wrote PDF report");
    println!("PDF report written to: {}", output_path.display());
    Ok(())
}

// ── Cover page ────────────────────────────────────────────────────────────────

fn add_cover_page(doc: &PdfDocumentReference, fonts: &Fonts, analysis: &Analysis, config: &Config) {
    let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Cover");
    let layer = doc.get_page(page_idx).get_layer(layer_idx);
    let (font_r, font_b) = (&fonts.regular, &fonts.bold);

    fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);

    let hdr_bot = PAGE_H - COVER_HDR_H;
    fill_gradient_h(&layer, 0.0, hdr_bot, PAGE_W, COVER_HDR_H, ACCENT_BLU, ACCENT_PUR, 28);

    set_color(&layer, WHITE_DIM);
    layer.use_text(
        format!("classify-doc v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(PAGE_W - MARGIN - 40.0), Mm(PAGE_H - 10.5), font_r,
    );

    set_color(&layer, WHITE);
    layer.use_text("Legal Document", 28.0, Mm(MARGIN), Mm(PAGE_H - 26.0), font_b);
    set_color(&layer, WHITE_DIM);
    layer.use_text("Analysis", 28.0, Mm(MARGIN), Mm(PAGE_H - 41.0), font_b);

    // ── Source chip ───────────────────────────────────────────────────────────
    let chip_y = hdr_bot - 18.0;
    let chip_h = 12.0f32;
    let chip_w = 106.0f32;
    fill_rounded_rect(&layer, MARGIN, chip_y, chip_w, chip_h, R_BADGE, PANEL);
    stroke_rounded_rect(&layer, MARGIN, chip_y, chip_w, chip_h, R_BADGE, PANEL_BORDER);
    fill_rect(&layer, MARGIN, chip_y, 2.5, chip_h, ACCENT_BLU);

    set_color(&layer, TEXT_MUT);
    layer.use_text("DOCUMENT", 6.0, Mm(MARGIN + 5.0), Mm(chip_y + chip_h - 3.8), font_b);
    set_color(&layer, TEXT_PRI);
    layer.use_text(
        truncate(&analysis.source, 34),
        9.5, Mm(MARGIN + 5.0), Mm(chip_y + 2.8), font_b,
    );

    set_color(&layer, TEXT_SEC);
    layer.use_text(
        format!("Term dictionary  {}", truncate(&config.origin, 60)),
        9.0, Mm(MARGIN), Mm(chip_y - 8.0), font_r,
    );

    // ── Overview cards ────────────────────────────────────────────────────────
    let rule_y = chip_y - 16.5;
    draw_hline(&layer, MARGIN, T_END, rule_y, PANEL_BORDER);
    set_color(&layer, TEXT_MUT);
    layer.use_text("OVERVIEW", 6.5, Mm(MARGIN), Mm(rule_y - 7.0), font_b);

    let mut cards: Vec<(String, String, (f32, f32, f32))> = vec![
        ("CLAUSES".to_string(), analysis.clause_count.to_string(), ACCENT_BLU),
        ("TERMS MATCHED".to_string(), analysis.matched_terms().to_string(), ACCENT_PUR),
    ];
    for term in &config.terms {
        let total = analysis.classification.get(&term.name).map_or(0, |m| m.total);
        let accent = if total > 0 { FLAG_FG } else { TEXT_MUT };
        cards.push((term.name.to_uppercase(), total.to_string(), accent));
    }

    const PER_ROW: usize = 4;
    let card_h = 26.0f32;
    let gap = 4.0f32;
    let card_w = (T_END - MARGIN - gap * (PER_ROW as f32 - 1.0)) / PER_ROW as f32;
    let first_card_y = rule_y - 42.0;

    for (i, (label, value, accent)) in cards.iter().enumerate() {
        let cx = MARGIN + (card_w + gap) * (i % PER_ROW) as f32;
        let cy = first_card_y - (card_h + gap) * (i / PER_ROW) as f32;
        draw_stat_card(&layer, cx, cy, card_w, card_h, label, value, *accent, font_r, font_b);
    }

    let rows = cards.len().div_ceil(PER_ROW) as f32;
    let section_y = first_card_y - (card_h + gap) * (rows - 1.0) - 13.0;
    draw_hline(&layer, MARGIN, T_END, section_y, PANEL_BORDER);
    set_color(&layer, TEXT_MUT);
    layer.use_text("WHAT'S IN THIS REPORT", 6.5, Mm(MARGIN), Mm(section_y - 7.5), font_b);

    let note = if analysis.classification.is_empty() {
        "None of the known clause categories were found in this document."
    } else {
        "For each matched term: guidance, sample clauses and areas to scrutinize"
    };
    fill_rounded_rect(&layer, MARGIN, section_y - 14.5, 2.0, 2.0, 1.0, ACCENT_BLU);
    set_color(&layer, TEXT_SEC);
    layer.use_text(note, 8.0, Mm(MARGIN + 5.0), Mm(section_y - 14.5), font_r);

    draw_footer(&layer, font_r);
}

#[allow(clippy::too_many_arguments)]
fn draw_stat_card(
    layer: &PdfLayerReference,
    x: f32, y: f32, w: f32, h: f32,
    label: &str,
    value: &str,
    accent: (f32, f32, f32),
    font_r: &IndirectFontRef,
    font_b: &IndirectFontRef,
) {
    fill_rounded_rect(layer, x, y, w, h, R_BADGE, PANEL);
    stroke_rounded_rect(layer, x, y, w, h, R_BADGE, PANEL_BORDER);
    fill_rect(layer, x, y + h - 2.0, w, 2.0, accent);

    set_color(layer, accent);
    layer.use_text(value, 20.0, Mm(x + 5.0), Mm(y + h * 0.38), font_b);

    set_color(layer, TEXT_MUT);
    layer.use_text(label, 6.5, Mm(x + 5.0), Mm(y + 3.5), font_r);
}

// ── Term sections ─────────────────────────────────────────────────────────────

/// Tracks the current page and the next free baseline on it.
struct Cursor<'a> {
    doc: &'a PdfDocumentReference,
    fonts: &'a Fonts,
    layer: PdfLayerReference,
    y: f32,
}

impl<'a> Cursor<'a> {
    fn new_page(doc: &'a PdfDocumentReference, fonts: &'a Fonts) -> Self {
        let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Terms");
        let layer = doc.get_page(page_idx).get_layer(layer_idx);
        fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);
        draw_footer(&layer, &fonts.regular);
        Cursor {
            doc,
            fonts,
            layer,
            y: PAGE_H - MARGIN,
        }
    }

    /// Start a new page unless `height` mm still fit above the footer.
    fn reserve(&mut self, height: f32) {
        if self.y - height < BOTTOM {
            *self = Cursor::new_page(self.doc, self.fonts);
        }
    }

    fn text(&mut self, text: &str, size: f32, x: f32, bold: bool, color: (f32, f32, f32)) {
        self.reserve(LINE_H);
        let font = if bold { &self.fonts.bold } else { &self.fonts.regular };
        set_color(&self.layer, color);
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
        self.y -= LINE_H;
    }

    fn label(&mut self, text: &str) {
        self.reserve(LINE_H * 3.0);
        self.y -= 2.0;
        self.text(text, 6.5, MARGIN, true, TEXT_MUT);
        self.y -= 1.0;
    }
}

fn add_term_section(
    cursor: &mut Cursor<'_>,
    term: &TermDefinition,
    m: &TermMatch,
    settings: &AnalysisSettings,
) {
    // Header band
    let band_h = 11.0f32;
    cursor.reserve(band_h + LINE_H * 4.0);
    let band_y = cursor.y - band_h + 4.0;
    fill_rounded_rect(&cursor.layer, MARGIN, band_y, T_END - MARGIN, band_h, R_PANEL, ACCENT_BLU);
    set_color(&cursor.layer, WHITE);
    cursor.layer.use_text(
        format!("{} Clauses ({})", term.title(), m.total),
        13.0, Mm(MARGIN + 4.0), Mm(band_y + 3.5), &cursor.fonts.bold,
    );
    cursor.y = band_y - 6.0;

    cursor.text(&term.explanation, 10.0, MARGIN, true, TEXT_PRI);
    for line in term.detailed_explanation.lines().filter(|l| !l.trim().is_empty()) {
        for wrapped in wrap_text(line.trim(), TEXT_WRAP) {
            cursor.text(&wrapped, 8.5, MARGIN + 2.0, false, TEXT_SEC);
        }
    }
    if !term.legal_reference.is_empty() {
        cursor.y -= 1.5;
        cursor.text(&term.legal_reference, 8.5, MARGIN, false, ACCENT_PUR);
    }

    // Sample clauses
    cursor.label("SAMPLE CLAUSES");
    for preview in m.previews(settings.preview_length) {
        let lines = wrap_text(&preview, CLAUSE_WRAP);
        let box_h = lines.len() as f32 * LINE_H + 3.0;
        cursor.reserve(box_h + 2.0);

        let box_top = cursor.y + LINE_H - 1.0;
        fill_rounded_rect(&cursor.layer, MARGIN, box_top - box_h, T_END - MARGIN, box_h, R_BADGE, PANEL_ALT);
        fill_rect(&cursor.layer, MARGIN, box_top - box_h, 1.5, box_h, ACCENT_BLU);

        for line in &lines {
            set_color(&cursor.layer, TEXT_PRI);
            cursor.layer.use_text(line.as_str(), 8.5, Mm(MARGIN + 4.0), Mm(cursor.y), &cursor.fonts.regular);
            cursor.y -= LINE_H;
        }
        cursor.y -= 4.0;
    }
    if m.total > m.clauses.len() {
        cursor.text(
            &format!("+ {} more matching clause(s)", m.total - m.clauses.len()),
            7.5, MARGIN + 2.0, false, TEXT_MUT,
        );
    }

    // Red flags
    if !term.scrutiny_areas.is_empty() {
        cursor.label("AREAS TO SCRUTINIZE");
        for area in &term.scrutiny_areas {
            cursor.reserve(LINE_H + 1.5);
            fill_rounded_rect(&cursor.layer, MARGIN, cursor.y - 1.3, T_END - MARGIN, 5.2, R_BADGE, FLAG_BG);
            fill_rounded_rect(&cursor.layer, MARGIN + 2.0, cursor.y + 0.2, 2.0, 2.0, 1.0, FLAG_FG);
            set_color(&cursor.layer, FLAG_FG);
            cursor.layer.use_text(area.as_str(), 8.5, Mm(MARGIN + 6.0), Mm(cursor.y), &cursor.fonts.bold);
            cursor.y -= LINE_H + 1.5;
        }
    }

    cursor.y -= 6.0;
    draw_hline(&cursor.layer, MARGIN, T_END, cursor.y + 3.0, PANEL_BORDER);
    cursor.y -= 4.0;
}

fn draw_footer(layer: &PdfLayerReference, font_r: &IndirectFontRef) {
    draw_hline(layer, MARGIN, T_END, 22.0, PANEL_BORDER);
    set_color(layer, TEXT_MUT);
    layer.use_text(
        format!("Generated by classify-doc v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(MARGIN), Mm(15.0), font_r,
    );
    layer.use_text(
        "Keyword-based guidance only. Not legal advice.",
        7.5, Mm(T_END - 64.0), Mm(15.0), font_r,
    );
}

// ── Drawing helpers ───────────────────────────────────────────────────────────

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb { r, g, b, icc_profile: None })
}

fn set_color(layer: &PdfLayerReference, color: (f32, f32, f32)) {
    layer.set_fill_color(rgb(color));
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32, color: (f32, f32, f32)) {
    layer.set_fill_color(rgb(color));
    layer.add_polygon(Polygon {
        rings: vec![vec![
            (Point::new(Mm(x),     Mm(y)),     false),
            (Point::new(Mm(x + w), Mm(y)),     false),
            (Point::new(Mm(x + w), Mm(y + h)), false),
            (Point::new(Mm(x),     Mm(y + h)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_fill_color(rgb((0.0, 0.0, 0.0)));
}

/// Clockwise polygon ring approximating a rounded rectangle, 8 segments per corner.
fn rounded_rect_ring(x: f32, y: f32, w: f32, h: f32, r: f32) -> Vec<(Point, bool)> {
    let r = r.min(w / 2.0).min(h / 2.0);
    const SEGS: usize = 8;
    let mut pts = Vec::with_capacity(4 * (SEGS + 1));

    let corners = [
        (x + w - r, y + r,     270.0f32, 360.0f32),
        (x + w - r, y + h - r, 0.0f32,   90.0f32),
        (x + r,     y + h - r, 90.0f32,  180.0f32),
        (x + r,     y + r,     180.0f32, 270.0f32),
    ];

    for (cx, cy, start, end) in &corners {
        for i in 0..=SEGS {
            let t = i as f32 / SEGS as f32;
            let angle = (start + (end - start) * t).to_radians();
            pts.push((
                Point::new(Mm(cx + r * angle.cos()), Mm(cy + r * angle.sin())),
                false,
            ));
        }
    }
    pts
}

fn fill_rounded_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32,
                     r: f32, color: (f32, f32, f32)) {
    layer.set_fill_color(rgb(color));
    layer.add_polygon(Polygon {
        rings: vec![rounded_rect_ring(x, y, w, h, r)],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_fill_color(rgb((0.0, 0.0, 0.0)));
}

fn stroke_rounded_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32,
                       r: f32, color: (f32, f32, f32)) {
    layer.set_outline_color(rgb(color));
    layer.set_outline_thickness(0.4);
    layer.add_polygon(Polygon {
        rings: vec![rounded_rect_ring(x, y, w, h, r)],
        mode: PaintMode::Stroke,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_outline_color(rgb((0.0, 0.0, 0.0)));
    layer.set_outline_thickness(1.0);
}

fn draw_hline(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32, color: (f32, f32, f32)) {
    layer.set_outline_color(rgb(color));
    layer.set_outline_thickness(0.3);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y)), false),
            (Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
    });
    layer.set_outline_color(rgb((0.0, 0.0, 0.0)));
    layer.set_outline_thickness(1.0);
}

/// Fill a left-to-right gradient rectangle using `steps` vertical strips.
#[allow(clippy::too_many_arguments)]
fn fill_gradient_h(
    layer: &PdfLayerReference,
    x: f32, y: f32, w: f32, h: f32,
    from: (f32, f32, f32),
    to: (f32, f32, f32),
    steps: usize,
) {
    let step_w = w / steps as f32;
    for i in 0..steps {
        let t = i as f32 / (steps - 1).max(1) as f32;
        let color = (
            from.0 + (to.0 - from.0) * t,
            from.1 + (to.1 - from.1) * t,
            from.2 + (to.2 - from.2) * t,
        );
        // overlap strips slightly to hide rounding gaps
        fill_rect(layer, x + i as f32 * step_w, y, step_w + 0.6, h, color);
    }
}

// ── Text helpers ──────────────────────────────────────────────────────────────

fn truncate(s: &str, max: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max {
        format!("{}…", chars[..max - 1].iter().collect::<String>())
    } else {
        s.to_string()
    }
}

/// Greedy word wrap by character count. Words longer than `max_chars` are split.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            lines.push(word.drain(..max_chars).collect());
        }
        if word.is_empty() {
            continue;
        }

        if current_len > 0 && current_len + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{classify, segment};

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("short", 20), vec!["short"]);
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn test_wrap_text_splits_long_words() {
        assert_eq!(wrap_text("abcdefghij xy", 4), vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("contract.pdf", 20), "contract.pdf");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_render_writes_pdf() {
        let config = Config::builtin().unwrap();
        let text = "Either party may terminate this agreement if the fee remains unpaid for sixty days.\n\n\
                    We collect personal information only to deliver the services described in this agreement.";
        let clauses = segment(text);
        let analysis = Analysis {
            source: "contract.txt".to_string(),
            clause_count: clauses.len(),
            classification: classify(&clauses, &config.terms),
        };

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.pdf");
        render(&analysis, &config, &config.analysis, &out).unwrap();

        let bytes = std::fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
