//! Canvas2D back-end - projects a SceneFrame onto an HTML5 canvas.
//!
//! Solids are drawn as projected discs and point clouds as dots. Post
//! effects are approximated by a soft glow on emissive materials.

use particlesway_core::{
    Anchor, CameraState, Card, Color, Control, Material, Overlay, Primitive, RenderBackend,
    RenderError, SceneFrame, Shape, Vec3, Viewport,
};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const PANEL_WIDTH: f64 = 220.0;
const PANEL_MARGIN: f64 = 16.0;
const LINE_HEIGHT: f64 = 18.0;

/// Renderer that draws scene frames to an HTML5 Canvas 2D context.
pub struct Canvas2DBackend {
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
}

impl Canvas2DBackend {
    /// Create a back-end for the given canvas element.
    ///
    /// A canvas without a 2D context still yields a back-end; its
    /// `render` reports [`RenderError::ContextUnavailable`].
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        Self { canvas, ctx }
    }

    /// Current surface size.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn context(&self) -> Result<&CanvasRenderingContext2d, RenderError> {
        self.ctx
            .as_ref()
            .ok_or_else(|| RenderError::ContextUnavailable("no 2d context".to_string()))
    }

    fn draw_primitive(
        &self,
        ctx: &CanvasRenderingContext2d,
        camera: &CameraState,
        viewport: Viewport,
        primitive: &Primitive,
    ) {
        let transform = &primitive.transform;
        let material = &primitive.material;
        match &primitive.shape {
            Shape::PointCloud { positions, sizes } => {
                ctx.set_fill_style_str(&material.color.to_css());
                for (position, size) in positions.iter().zip(sizes) {
                    let world = transform.apply(*position);
                    if let Some(p) = camera.project(world, viewport) {
                        let r = f64::from((size * p.scale * 0.5).max(0.5));
                        ctx.fill_rect(
                            f64::from(p.screen.x) - r,
                            f64::from(p.screen.y) - r,
                            r * 2.0,
                            r * 2.0,
                        );
                    }
                }
            }
            Shape::Label { text } => {
                if let Some(p) = camera.project(transform.translation, viewport) {
                    ctx.set_fill_style_str(&material.color.to_css());
                    ctx.set_font(&format!("{}px sans-serif", (p.scale * 0.6).clamp(10.0, 32.0)));
                    ctx.set_text_align("center");
                    ctx.fill_text(text, f64::from(p.screen.x), f64::from(p.screen.y))
                        .ok();
                }
            }
            Shape::Sparkles { count, scale, size } => {
                // Deterministic scatter keeps sparkles stable between frames.
                ctx.set_fill_style_str(&material.color.with_alpha(0.6).to_css());
                for i in 0..*count {
                    let f = i as f32;
                    let local = Vec3::new(
                        (f * 12.989_8).sin() * scale * 0.5,
                        (f * 78.233).sin() * scale * 0.5,
                        (f * 37.719).sin() * scale * 0.5,
                    );
                    if let Some(p) = camera.project(transform.apply(local), viewport) {
                        let r = f64::from(size * 0.3);
                        ctx.fill_rect(f64::from(p.screen.x), f64::from(p.screen.y), r, r);
                    }
                }
            }
            shape => {
                let Some(p) = camera.project(transform.translation, viewport) else {
                    return;
                };
                let radius = f64::from(outer_radius(shape) * transform.scale * p.scale);
                if radius <= 0.0 {
                    return;
                }
                ctx.begin_path();
                if matches!(shape, Shape::Cube { .. }) {
                    ctx.rect(
                        f64::from(p.screen.x) - radius,
                        f64::from(p.screen.y) - radius,
                        radius * 2.0,
                        radius * 2.0,
                    );
                } else {
                    ctx.arc(f64::from(p.screen.x), f64::from(p.screen.y), radius, 0.0, TAU)
                        .ok();
                }
                self.paint(ctx, material);
            }
        }
    }

    fn paint(&self, ctx: &CanvasRenderingContext2d, material: &Material) {
        ctx.set_global_alpha(f64::from(material.opacity));
        if material.emissive_intensity > 0.0 {
            ctx.set_shadow_color(&material.emissive.to_css());
            ctx.set_shadow_blur(f64::from(material.emissive_intensity * 20.0));
        }
        if material.wireframe {
            ctx.set_stroke_style_str(&material.color.to_css());
            ctx.set_line_width(1.0);
            ctx.stroke();
        } else {
            ctx.set_fill_style_str(&material.color.to_css());
            ctx.fill();
        }
        ctx.set_shadow_blur(0.0);
        ctx.set_global_alpha(1.0);
    }

    fn draw_overlay(
        &self,
        ctx: &CanvasRenderingContext2d,
        camera: &CameraState,
        viewport: Viewport,
        overlay: &Overlay,
    ) {
        match overlay {
            Overlay::Panel {
                anchor,
                title,
                cards,
                chart,
            } => {
                let chart_height = if chart.is_empty() { 0.0 } else { 60.0 };
                let height = LINE_HEIGHT * (cards.len() as f64 * 2.0 + 2.0) + chart_height;
                let (x, y) = anchored(*anchor, viewport, PANEL_WIDTH, height);
                self.panel_frame(ctx, x, y, PANEL_WIDTH, height, Color::SHELL_BLUE);
                self.text(ctx, title, x + 12.0, y + LINE_HEIGHT * 1.5, "bold 14px", Color::WHITE);
                let mut line = y + LINE_HEIGHT * 3.0;
                for card in cards {
                    self.card(ctx, card, x + 12.0, line);
                    line += LINE_HEIGHT * 2.0;
                }
                if !chart.is_empty() {
                    let bar = (PANEL_WIDTH - 24.0) / chart.len() as f64;
                    ctx.set_fill_style_str(&Color::SHELL_BLUE.to_css());
                    for (i, h) in chart.iter().enumerate() {
                        let h = f64::from(*h) / 100.0 * chart_height;
                        ctx.fill_rect(
                            x + 12.0 + bar * i as f64,
                            line + chart_height - h,
                            bar - 2.0,
                            h,
                        );
                    }
                }
            }
            Overlay::Controls { anchor, controls } => {
                let height = LINE_HEIGHT * (controls.len() as f64 + 2.0);
                let (x, y) = anchored(*anchor, viewport, PANEL_WIDTH, height);
                self.panel_frame(ctx, x, y, PANEL_WIDTH, height, Color::AMBER);
                self.text(
                    ctx,
                    "Visualization Controls",
                    x + 12.0,
                    y + LINE_HEIGHT * 1.5,
                    "bold 13px",
                    Color::WHITE,
                );
                for (i, control) in controls.iter().enumerate() {
                    self.control(ctx, control, x + 12.0, y + LINE_HEIGHT * (i as f64 + 2.5));
                }
            }
            Overlay::Tooltip {
                anchor,
                color,
                title,
                lines,
            } => {
                let Some(p) = camera.project(*anchor, viewport) else {
                    return;
                };
                let height = LINE_HEIGHT * (lines.len() as f64 + 2.0);
                let x = f64::from(p.screen.x) + 20.0;
                let y = f64::from(p.screen.y) - height / 2.0;
                self.panel_frame(ctx, x, y, PANEL_WIDTH, height, *color);
                self.text(ctx, title, x + 12.0, y + LINE_HEIGHT * 1.2, "bold 14px", *color);
                for (i, line) in lines.iter().enumerate() {
                    self.text(
                        ctx,
                        line,
                        x + 12.0,
                        y + LINE_HEIGHT * (i as f64 + 2.2),
                        "12px",
                        Color::WHITE,
                    );
                }
            }
            Overlay::Progress { percent, text } => {
                self.progress(ctx, viewport, *percent, text);
            }
        }
    }

    fn panel_frame(
        &self,
        ctx: &CanvasRenderingContext2d,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        accent: Color,
    ) {
        ctx.set_fill_style_str(&Color::BLACK.with_alpha(0.8).to_css());
        ctx.fill_rect(x, y, w, h);
        ctx.set_stroke_style_str(&accent.to_css());
        ctx.set_line_width(1.0);
        ctx.stroke_rect(x, y, w, h);
    }

    fn card(&self, ctx: &CanvasRenderingContext2d, card: &Card, x: f64, y: f64) {
        self.text(ctx, &card.title, x, y, "11px", Color::WHITE.with_alpha(0.7));
        self.text(ctx, &card.value, x, y + LINE_HEIGHT, "bold 14px", Color::WHITE);
        if let Some(trend) = &card.trend {
            self.text(
                ctx,
                trend,
                x + PANEL_WIDTH - 80.0,
                y + LINE_HEIGHT,
                "11px",
                Color::STATUS_GREEN,
            );
        }
    }

    fn control(&self, ctx: &CanvasRenderingContext2d, control: &Control, x: f64, y: f64) {
        let color = if control.active {
            Color::AMBER
        } else {
            Color::WHITE.with_alpha(0.6)
        };
        self.text(ctx, &control.label, x, y, "12px", color);
    }

    fn text(
        &self,
        ctx: &CanvasRenderingContext2d,
        content: &str,
        x: f64,
        y: f64,
        font: &str,
        color: Color,
    ) {
        ctx.set_font(&format!("{font} sans-serif"));
        ctx.set_text_align("left");
        ctx.set_fill_style_str(&color.to_css());
        ctx.fill_text(content, x, y).ok();
    }

    fn progress(
        &self,
        ctx: &CanvasRenderingContext2d,
        viewport: Viewport,
        percent: u8,
        status: &str,
    ) {
        let w = f64::from(viewport.width);
        let h = f64::from(viewport.height);
        ctx.set_fill_style_str(&Color::from_rgb_u32(0x09_0A_0F).with_alpha(0.9).to_css());
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_text_align("center");
        ctx.set_font("bold 28px sans-serif");
        ctx.set_fill_style_str(&Color::GOLD.to_css());
        ctx.fill_text("BahyWay ParticlesWay", w / 2.0, h / 2.0 - 40.0).ok();

        let bar_w = 300.0;
        let x = (w - bar_w) / 2.0;
        ctx.set_fill_style_str(&Color::WHITE.with_alpha(0.1).to_css());
        ctx.fill_rect(x, h / 2.0, bar_w, 6.0);
        ctx.set_fill_style_str(&Color::GOLD.to_css());
        ctx.fill_rect(x, h / 2.0, bar_w * f64::from(percent.min(100)) / 100.0, 6.0);

        ctx.set_font("14px sans-serif");
        ctx.set_fill_style_str(&Color::WHITE.with_alpha(0.8).to_css());
        ctx.fill_text(status, w / 2.0, h / 2.0 + 30.0).ok();
    }
}

impl RenderBackend for Canvas2DBackend {
    fn render(&mut self, frame: &SceneFrame) -> Result<(), RenderError> {
        let ctx = self.context()?;
        let viewport = self.viewport();

        ctx.set_fill_style_str(&frame.background.to_css());
        ctx.fill_rect(
            0.0,
            0.0,
            f64::from(viewport.width),
            f64::from(viewport.height),
        );

        for primitive in &frame.primitives {
            self.draw_primitive(ctx, &frame.camera, viewport, primitive);
        }
        for overlay in &frame.overlays {
            self.draw_overlay(ctx, &frame.camera, viewport, overlay);
        }
        Ok(())
    }

    fn present_fallback(&mut self, percent: u8, text: &str) -> Result<(), RenderError> {
        // Without a context the placeholder is left to the page markup.
        let Ok(ctx) = self.context() else {
            web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(text));
            return Ok(());
        };
        self.progress(ctx, self.viewport(), percent, text);
        Ok(())
    }
}

fn outer_radius(shape: &Shape) -> f32 {
    match shape {
        Shape::Sphere { radius } => *radius,
        Shape::Torus { radius, tube } => radius + tube,
        Shape::Ring { outer, .. } => *outer,
        Shape::Cylinder { radius, .. } => *radius,
        Shape::Cube { size } => size / 2.0,
        Shape::PointCloud { .. } | Shape::Sparkles { .. } | Shape::Label { .. } => 0.0,
    }
}

fn anchored(anchor: Anchor, viewport: Viewport, w: f64, h: f64) -> (f64, f64) {
    let vw = f64::from(viewport.width);
    let vh = f64::from(viewport.height);
    match anchor {
        Anchor::TopLeft => (PANEL_MARGIN, PANEL_MARGIN),
        Anchor::TopRight => (vw - w - PANEL_MARGIN, PANEL_MARGIN),
        Anchor::BottomLeft => (PANEL_MARGIN, vh - h - PANEL_MARGIN),
        Anchor::BottomRight => (vw - w - PANEL_MARGIN, vh - h - PANEL_MARGIN),
        Anchor::Center => ((vw - w) / 2.0, (vh - h) / 2.0),
    }
}
