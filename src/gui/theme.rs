use eframe::egui::{
    self,
    epaint::Shadow,
    style::{
        Selection,
        WidgetVisuals,
        Widgets,
    },
    Color32,
    RichText,
    Stroke,
    Visuals,
};

#[derive(Clone)]
pub struct Theme {
    dark: Palette,
    light: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::forest()
    }
}

impl Theme {
    pub fn forest() -> Self {
        Self { dark: Palette::forest_night(), light: Palette::field_notes() }
    }

    fn palette(&self, ctx: &egui::Context) -> &Palette {
        if ctx.style().visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn success(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).moss
    }

    pub fn danger(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).rust
    }

    pub fn warning(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).amber
    }

    pub fn muted(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).lichen
    }

    pub fn heading(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.palette(ctx).amber).strong()
    }
}

#[derive(Clone)]
struct Palette {
    soil: Color32,
    bark: Color32,
    loam: Color32,
    birch: Color32,
    ink: Color32,
    lichen: Color32,
    moss: Color32,
    rust: Color32,
    amber: Color32,
    sky: Color32,
}

impl Palette {
    fn forest_night() -> Self {
        Self {
            soil: Color32::from_rgb(22, 27, 24),
            bark: Color32::from_rgb(31, 38, 34),
            loam: Color32::from_rgb(46, 56, 50),
            birch: Color32::from_rgb(64, 77, 69),
            ink: Color32::from_rgb(226, 230, 219),
            lichen: Color32::from_rgb(150, 163, 140),
            moss: Color32::from_rgb(126, 201, 112),
            rust: Color32::from_rgb(232, 112, 86),
            amber: Color32::from_rgb(236, 185, 92),
            sky: Color32::from_rgb(120, 190, 230),
        }
    }

    fn field_notes() -> Self {
        Self {
            soil: Color32::from_rgb(232, 228, 214),
            bark: Color32::from_rgb(243, 240, 229),
            loam: Color32::from_rgb(251, 249, 241),
            birch: Color32::from_rgb(214, 208, 190),
            ink: Color32::from_rgb(38, 42, 36),
            lichen: Color32::from_rgb(110, 118, 100),
            moss: Color32::from_rgb(58, 132, 60),
            rust: Color32::from_rgb(184, 72, 50),
            amber: Color32::from_rgb(164, 110, 20),
            sky: Color32::from_rgb(36, 110, 170),
        }
    }

    fn widget(&self, base: WidgetVisuals, fill: Color32, outline: Color32) -> WidgetVisuals {
        WidgetVisuals {
            bg_fill: fill,
            weak_bg_fill: fill,
            bg_stroke: Stroke { color: outline, ..base.bg_stroke },
            fg_stroke: Stroke { color: self.ink, ..base.fg_stroke },
            ..base
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    set_theme_variant(ctx, &theme.dark, true);
    set_theme_variant(ctx, &theme.light, false);
}

fn set_theme_variant(ctx: &egui::Context, palette: &Palette, is_dark: bool) {
    let (default, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };

    let widgets = Widgets {
        noninteractive: palette.widget(default.widgets.noninteractive, palette.bark, palette.loam),
        inactive: palette.widget(default.widgets.inactive, palette.loam, palette.birch),
        hovered: palette.widget(default.widgets.hovered, palette.birch, palette.moss),
        active: palette.widget(default.widgets.active, palette.birch, palette.amber),
        open: palette.widget(default.widgets.open, palette.bark, palette.amber),
    };

    ctx.set_visuals_of(
        variant,
        Visuals {
            dark_mode: is_dark,
            widgets,
            selection: Selection {
                bg_fill: palette.birch,
                stroke: Stroke { color: palette.ink, ..default.selection.stroke },
            },
            hyperlink_color: palette.sky,
            faint_bg_color: palette.bark,
            extreme_bg_color: palette.soil,
            code_bg_color: palette.soil,
            error_fg_color: palette.rust,
            warn_fg_color: palette.amber,
            window_shadow: Shadow { color: palette.soil, ..default.window_shadow },
            window_fill: palette.bark,
            window_stroke: Stroke { color: palette.loam, ..default.window_stroke },
            panel_fill: palette.soil,
            popup_shadow: Shadow { color: palette.soil, ..default.popup_shadow },
            ..default
        },
    );
}
