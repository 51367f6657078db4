//! Résumé layout pass.
//!
//! A single deterministic walk over the document sections that produces a
//! per-page draw list. No PDF knowledge lives here; `render::pdf` serializes
//! the result.
//!
//! # Pagination
//! Before each line is drawn, a baseline below the bottom margin starts a new
//! page. A section title additionally needs room for itself and one body
//! line, so it never ends up alone at the bottom of a page. Content is never
//! truncated.

use serde::Serialize;

use crate::layout::{wrap_lines, FontFace, PageGeometry, TextMeasure};
use crate::models::resume::ResumeDocument;
use crate::render::cursor::RenderCursor;

const NAME_SIZE: f32 = 16.0;
const TITLE_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;
const SECTION_GAP: f32 = 10.0;
const TITLE_RULE_GAP: f32 = 5.0;
const ENTRY_GAP: f32 = 5.0;
const RULE_OFFSET: f32 = 5.0;
const RULE_THICKNESS: f32 = 1.0;
const BULLET_INDENT: f32 = 10.0;

// ────────────────────────────────────────────────────────────────────────────
// Draw list
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        face: FontFace,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
    },
}

/// Positioned drawing operations, one vector per page. Always has at least one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawList {
    pub geometry: PageGeometry,
    pub pages: Vec<Vec<DrawOp>>,
}

impl DrawList {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All drawn strings in reading order.
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flatten().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rule { .. } => None,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Renderer state machine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    Header,
    Objective,
    Summary,
    Skills,
    Projects,
    Experience,
    Education,
    Certifications,
    Done,
}

impl RenderStage {
    pub fn next(self) -> Self {
        match self {
            RenderStage::Header => RenderStage::Objective,
            RenderStage::Objective => RenderStage::Summary,
            RenderStage::Summary => RenderStage::Skills,
            RenderStage::Skills => RenderStage::Projects,
            RenderStage::Projects => RenderStage::Experience,
            RenderStage::Experience => RenderStage::Education,
            RenderStage::Education => RenderStage::Certifications,
            RenderStage::Certifications | RenderStage::Done => RenderStage::Done,
        }
    }
}

pub struct ResumeRenderer<'a> {
    geometry: PageGeometry,
    measure: &'a dyn TextMeasure,
    cursor: RenderCursor,
    pages: Vec<Vec<DrawOp>>,
    stage: RenderStage,
}

impl<'a> ResumeRenderer<'a> {
    pub fn new(geometry: PageGeometry, measure: &'a dyn TextMeasure) -> Self {
        Self {
            geometry,
            measure,
            cursor: RenderCursor::at_top(&geometry),
            pages: vec![Vec::new()],
            stage: RenderStage::Header,
        }
    }

    pub fn stage(&self) -> RenderStage {
        self.stage
    }

    /// Renders the current stage and advances to the next one.
    pub fn step(&mut self, doc: &ResumeDocument) -> RenderStage {
        let margin = self.geometry.margin;
        let body_width = self.geometry.content_width();

        match self.stage {
            RenderStage::Header => {
                let h = &doc.header;
                self.add_text(&h.name, margin, NAME_SIZE, FontFace::Bold, None);
                self.add_text(
                    &format!("{} | {}", h.location, h.phone),
                    margin,
                    BODY_SIZE,
                    FontFace::Regular,
                    None,
                );
                self.add_text(
                    &format!("Email: {} | LinkedIn: {}", h.email, h.linkedin),
                    margin,
                    BODY_SIZE,
                    FontFace::Regular,
                    None,
                );
            }
            RenderStage::Objective => {
                self.section_title(&doc.objective.title);
                self.body(&doc.objective.content, body_width);
            }
            RenderStage::Summary => {
                self.section_title(&doc.summary.title);
                self.body(&doc.summary.content, body_width);
            }
            RenderStage::Skills => {
                self.section_title(&doc.skills.title);
                for category in &doc.skills.categories {
                    self.body(&format!("{}: {}", category.title, category.skills), body_width);
                }
            }
            RenderStage::Projects => {
                self.section_title(&doc.projects.title);
                for p in &doc.projects.items {
                    let heading = format!("{} | {} - {}", p.title, p.organization, p.location);
                    self.entry(&heading, &p.date, &p.description, &p.achievements);
                }
            }
            RenderStage::Experience => {
                self.section_title(&doc.experience.title);
                for e in &doc.experience.items {
                    let heading = format!("{} | {} - {}", e.position, e.company, e.location);
                    self.entry(&heading, &e.date, &e.description, &e.achievements);
                }
            }
            RenderStage::Education => {
                self.section_title(&doc.education.title);
                for e in &doc.education.items {
                    let heading = format!("{} - {}", e.degree, e.institution);
                    self.add_text(&heading, margin, BODY_SIZE, FontFace::Bold, None);
                    self.add_text(&e.date, margin, BODY_SIZE, FontFace::Regular, None);
                    self.body(&e.courses, body_width);
                    self.cursor.advance(ENTRY_GAP);
                }
            }
            RenderStage::Certifications => {
                self.section_title(&doc.certifications.title);
                for cert in &doc.certifications.items {
                    self.body(&format!("- {cert}"), body_width);
                }
            }
            RenderStage::Done => {}
        }

        self.stage = self.stage.next();
        self.stage
    }

    /// Runs every remaining stage and returns the finished draw list.
    pub fn render(mut self, doc: &ResumeDocument) -> DrawList {
        while self.stage != RenderStage::Done {
            self.step(doc);
        }
        self.finish()
    }

    pub fn finish(self) -> DrawList {
        DrawList {
            geometry: self.geometry,
            pages: self.pages,
        }
    }

    // ── primitives ──────────────────────────────────────────────────────────

    fn entry(&mut self, heading: &str, date: &str, description: &str, achievements: &[String]) {
        let margin = self.geometry.margin;
        let body_width = self.geometry.content_width();

        self.add_text(heading, margin, BODY_SIZE, FontFace::Bold, None);
        self.add_text(date, margin, BODY_SIZE, FontFace::Regular, None);
        self.body(description, body_width);
        for achievement in achievements {
            self.add_text(
                &format!("- {achievement}"),
                margin + BULLET_INDENT,
                BODY_SIZE,
                FontFace::Regular,
                Some(body_width - BULLET_INDENT),
            );
        }
        self.cursor.advance(ENTRY_GAP);
    }

    fn body(&mut self, text: &str, max_width: f32) {
        self.add_text(text, self.geometry.margin, BODY_SIZE, FontFace::Regular, Some(max_width));
    }

    fn section_title(&mut self, title: &str) {
        self.cursor.advance(SECTION_GAP);
        // The first body line sits one line plus the rule gap below the title.
        if !self.cursor.fits(self.geometry.line_height + TITLE_RULE_GAP, &self.geometry) {
            self.new_page();
        }

        self.add_text(title, self.geometry.margin, TITLE_SIZE, FontFace::Bold, None);
        let rule_y = self.cursor.vertical_position + RULE_OFFSET;
        self.push(DrawOp::Rule {
            x1: self.geometry.margin,
            x2: self.geometry.width - self.geometry.margin,
            y: rule_y,
            thickness: RULE_THICKNESS,
        });
        self.cursor.advance(TITLE_RULE_GAP);
    }

    /// Draws `text` (wrapped when `max_width` is set), one line height per line.
    /// Blank wrapped text still consumes one line.
    fn add_text(&mut self, text: &str, x: f32, size: f32, face: FontFace, max_width: Option<f32>) {
        let lines = match max_width {
            Some(width) => wrap_lines(text, width, self.measure, face, size),
            None => vec![text.to_string()],
        };

        if lines.is_empty() {
            self.cursor.advance(self.geometry.line_height);
            return;
        }
        for line in lines {
            self.draw_line(line, x, size, face);
        }
    }

    fn draw_line(&mut self, text: String, x: f32, size: f32, face: FontFace) {
        if !self.cursor.can_draw(&self.geometry) {
            self.new_page();
        }
        let y = self.cursor.vertical_position;
        self.push(DrawOp::Text { text, x, y, size, face });
        self.cursor.advance(self.geometry.line_height);
    }

    fn new_page(&mut self) {
        self.cursor.next_page(&self.geometry);
        self.pages.push(Vec::new());
    }

    fn push(&mut self, op: DrawOp) {
        let index = self.cursor.page_index;
        self.pages[index].push(op);
    }
}

/// Lays out `doc` on pages described by `geometry`.
pub fn layout_resume(doc: &ResumeDocument, geometry: PageGeometry, measure: &dyn TextMeasure) -> DrawList {
    ResumeRenderer::new(geometry, measure).render(doc)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
