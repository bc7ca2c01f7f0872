//! Target-independent motion and layout logic for the portfolio pages.
//!
//! Everything that can be decided without touching the DOM lives here: the
//! theme flag, the background line simulation, particle parameters, the
//! scroll-position-based active-section selection, the project filter
//! predicate, and the card tilt math. The wasm frontend feeds these with real
//! element geometry and `Math.random`; the tests feed them seeded values.

use std::f64::consts::FRAC_PI_2;

pub const PARTICLE_COUNT: usize = 60;
pub const MIN_LINE_COUNT: usize = 15;
pub const LINE_WIDTH: f64 = 0.4;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Textual boolean written to persistent storage.
    pub fn stored_value(self) -> &'static str {
        match self {
            Self::Light => "false",
            Self::Dark => "true",
        }
    }

    /// Absence of a stored value defaults to dark, not light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            None => Self::Dark,
            Some("true") => Self::Dark,
            Some(_) => Self::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Label shown next to the mobile toggle: names the mode a tap switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Dark => "Light Mode",
            Self::Light => "Dark Mode",
        }
    }
}

/// One animated background line segment, in canvas pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub x: f64,
    pub y: f64,
    pub length: f64,
    pub angle: f64,
    pub speed: f64,
    pub opacity: f64,
    pub color: String,
}

pub fn line_count(width: f64) -> usize {
    MIN_LINE_COUNT.max((width / 60.0).floor() as usize)
}

pub fn spawn_line(rand: &mut impl FnMut() -> f64, width: f64, height: f64, color: &str) -> Line {
    Line {
        x: rand() * width,
        y: rand() * height,
        length: rand() * height * 0.25 + height * 0.05,
        angle: (rand() - 0.5) * 0.1 - FRAC_PI_2,
        speed: rand() * 0.15 + 0.03,
        opacity: fresh_opacity(rand),
        color: color.to_string(),
    }
}

fn fresh_opacity(rand: &mut impl FnMut() -> f64) -> f64 {
    rand() * 0.1 + 0.02
}

/// Advances one line by one frame, wrapping it to the opposite edge (with a
/// new random x and opacity) once it drifts past the logical bounds. A line
/// is never left outside `[-length, height + length]` after this returns.
pub fn advance_line(line: &mut Line, width: f64, height: f64, rand: &mut impl FnMut() -> f64) {
    let vertical_sign = if line.angle.sin() > 0.0 { 1.0 } else { -1.0 };
    let horizontal_sign = if line.angle.cos() > 0.0 { 1.0 } else { -1.0 };
    line.y += line.speed * vertical_sign;
    line.x += line.speed * horizontal_sign * 0.2;

    if line.y > height + line.length || line.y < -line.length {
        line.y = if vertical_sign > 0.0 {
            -line.length
        } else {
            height + line.length
        };
        line.x = rand() * width;
        line.opacity = fresh_opacity(rand);
    }
}

/// Animation parameters for one decorative floating particle. Positions and
/// drift targets are viewport-relative percentages; times are seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub duration: f64,
    pub delay: f64,
    pub x_end: f64,
    pub y_end: f64,
    pub opacity_start: f64,
    pub scale_end: f64,
}

pub fn spawn_particle(rand: &mut impl FnMut() -> f64) -> Particle {
    let x = rand() * 100.0;
    let y = rand() * 100.0;
    Particle {
        x,
        y,
        size: rand() * 2.5 + 0.5,
        duration: rand() * 30.0 + 20.0,
        delay: rand() * 20.0,
        x_end: x + (rand() - 0.5) * 50.0,
        y_end: y + (rand() - 0.5) * 50.0,
        opacity_start: rand() * 0.3 + 0.05,
        scale_end: rand() * 0.5 + 0.3,
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Page {
    Home,
    Projects,
    Other,
}

pub fn page_from_path(path: &str) -> Page {
    if path.ends_with("projects.html") {
        Page::Projects
    } else if path.ends_with("index.html") || path == "/" {
        Page::Home
    } else {
        Page::Other
    }
}

/// Trailing file component of a pathname, used to detect self-links.
pub fn current_page_file(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// A same-site link that should get the simulated page transition: points at
/// another document (explicit `.html` or extensionless), not the current one.
/// Anchor, mailto and `_blank` links are excluded by the caller's selector.
pub fn is_internal_page_link(href: &str, current_file: &str) -> bool {
    (href.ends_with(".html") || !href.contains('.')) && href != current_file
}

/// Vertical extent of one identified section, in document pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Picks the section the nav should highlight for the current scroll offset.
///
/// The projects listing page is pinned to its own identifier regardless of
/// scroll. Elsewhere every section is scanned in document order and the last
/// one whose adjusted span contains the offset wins (overlapping spans
/// resolve to the later section). Above the first section, or on a home page
/// with no sections at all, the home identifier is the fallback.
pub fn active_section_id(
    page: Page,
    sections: &[SectionSpan],
    scroll: f64,
    nav_height: f64,
    viewport_height: f64,
) -> Option<String> {
    if page == Page::Projects {
        return Some("projects-page".to_string());
    }

    let lead = (viewport_height * 0.2).min(100.0);
    let mut current = None;
    for section in sections {
        let top = section.top - nav_height - lead;
        let bottom = top + section.height;
        if scroll >= top && scroll < bottom {
            current = Some(section.id.clone());
        }
    }

    if current.is_none() {
        let first_top = sections
            .first()
            .map(|section| section.top - nav_height - 70.0)
            .unwrap_or(viewport_height);
        if scroll < first_top {
            current = Some("home".to_string());
        } else if sections.is_empty() && page == Page::Home {
            current = Some("home".to_string());
        }
    }

    current
}

pub fn filter_matches(filter: &str, categories: &str) -> bool {
    filter == "all" || categories.split_whitespace().any(|tag| tag == filter)
}

/// Card tilt for a pointer at `(dx, dy)` from the card center: returns
/// `(rotation_x, rotation_y)` in degrees, bounded by the ±20 scale factors.
pub fn tilt_rotation(dx: f64, dy: f64, width: f64, height: f64) -> (f64, f64) {
    ((dy / height) * -20.0, (dx / width) * 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic sampler in [0, 1) so the randomized spawn paths are
    /// reproducible on the host.
    fn seeded_rand(seed: u64) -> impl FnMut() -> f64 {
        let mut state = seed.max(1);
        move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    #[test]
    fn theme_defaults_to_dark_when_unset() {
        assert_eq!(Theme::from_stored(None), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("true")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("false")), Theme::Light);
    }

    #[test]
    fn theme_double_toggle_round_trips() {
        for theme in [Theme::Dark, Theme::Light] {
            assert_eq!(theme.toggled().toggled(), theme);
            assert_eq!(Theme::from_stored(Some(theme.stored_value())), theme);
        }
    }

    #[test]
    fn line_count_floors_at_minimum() {
        assert_eq!(line_count(0.0), 15);
        assert_eq!(line_count(600.0), 15);
        assert_eq!(line_count(1920.0), 32);
    }

    #[test]
    fn spawned_lines_stay_within_parameter_ranges() {
        let mut rand = seeded_rand(7);
        for _ in 0..500 {
            let line = spawn_line(&mut rand, 1280.0, 720.0, "#8888ff");
            assert!(line.x >= 0.0 && line.x < 1280.0);
            assert!(line.y >= 0.0 && line.y < 720.0);
            assert!(line.length >= 720.0 * 0.05 && line.length <= 720.0 * 0.30);
            assert!(line.angle >= -FRAC_PI_2 - 0.05 && line.angle <= -FRAC_PI_2 + 0.05);
            assert!(line.speed >= 0.03 && line.speed <= 0.18);
            assert!(line.opacity >= 0.02 && line.opacity <= 0.12);
        }
    }

    #[test]
    fn line_past_lower_bound_wraps_to_opposite_edge() {
        let mut rand = seeded_rand(11);
        let mut line = Line {
            x: 100.0,
            y: -40.0,
            length: 30.0,
            angle: -FRAC_PI_2 + 0.01,
            speed: 0.1,
            opacity: 0.05,
            color: "#fff".to_string(),
        };
        // sin(angle) < 0, so the line drifts upward and re-enters from below.
        advance_line(&mut line, 800.0, 600.0, &mut rand);
        assert_eq!(line.y, 600.0 + line.length);
        assert!(line.x >= 0.0 && line.x < 800.0);
        assert!(line.opacity >= 0.02 && line.opacity <= 0.12);
    }

    #[test]
    fn line_within_bounds_keeps_its_opacity() {
        let mut rand = seeded_rand(13);
        let mut line = Line {
            x: 100.0,
            y: 300.0,
            length: 30.0,
            angle: -FRAC_PI_2,
            speed: 0.1,
            opacity: 0.07,
            color: "#fff".to_string(),
        };
        advance_line(&mut line, 800.0, 600.0, &mut rand);
        assert_eq!(line.opacity, 0.07);
        assert!(line.y >= -line.length && line.y <= 600.0 + line.length);
    }

    #[test]
    fn long_simulation_never_leaves_wrap_bounds() {
        let mut rand = seeded_rand(17);
        let (width, height) = (900.0, 500.0);
        let mut lines: Vec<Line> = (0..line_count(width))
            .map(|_| spawn_line(&mut rand, width, height, "#abc"))
            .collect();
        for _ in 0..20_000 {
            for line in &mut lines {
                advance_line(line, width, height, &mut rand);
                assert!(line.y >= -line.length && line.y <= height + line.length);
            }
        }
    }

    #[test]
    fn particle_parameters_stay_within_ranges() {
        let mut rand = seeded_rand(23);
        for _ in 0..PARTICLE_COUNT {
            let particle = spawn_particle(&mut rand);
            assert!(particle.size >= 0.5 && particle.size <= 3.0);
            assert!(particle.duration >= 20.0 && particle.duration <= 50.0);
            assert!(particle.delay >= 0.0 && particle.delay <= 20.0);
            assert!(particle.opacity_start >= 0.05 && particle.opacity_start <= 0.35);
            assert!(particle.scale_end >= 0.3 && particle.scale_end <= 0.8);
            assert!((particle.x_end - particle.x).abs() <= 25.0);
            assert!((particle.y_end - particle.y).abs() <= 25.0);
        }
    }

    #[test]
    fn page_classification_covers_site_paths() {
        assert_eq!(page_from_path("/"), Page::Home);
        assert_eq!(page_from_path("/index.html"), Page::Home);
        assert_eq!(page_from_path("/projects.html"), Page::Projects);
        assert_eq!(page_from_path("/about.html"), Page::Other);
    }

    #[test]
    fn internal_link_detection_skips_current_page_and_assets() {
        assert!(is_internal_page_link("projects.html", "index.html"));
        assert!(is_internal_page_link("about", "index.html"));
        assert!(!is_internal_page_link("index.html", "index.html"));
        assert!(!is_internal_page_link("resume.pdf", "index.html"));
    }

    fn spans(defs: &[(&str, f64, f64)]) -> Vec<SectionSpan> {
        defs.iter()
            .map(|(id, top, height)| SectionSpan {
                id: id.to_string(),
                top: *top,
                height: *height,
            })
            .collect()
    }

    #[test]
    fn projects_page_is_always_its_own_section() {
        let sections = spans(&[("about", 600.0, 400.0)]);
        for scroll in [0.0, 500.0, 5000.0] {
            assert_eq!(
                active_section_id(Page::Projects, &sections, scroll, 60.0, 800.0),
                Some("projects-page".to_string())
            );
        }
    }

    #[test]
    fn scroll_inside_single_span_selects_that_section() {
        let sections = spans(&[("about", 600.0, 400.0), ("skills", 1000.0, 400.0)]);
        // lead = min(100, 0.2 * 800) = 100; about spans [440, 840).
        assert_eq!(
            active_section_id(Page::Home, &sections, 500.0, 60.0, 800.0),
            Some("about".to_string())
        );
        assert_eq!(
            active_section_id(Page::Home, &sections, 900.0, 60.0, 800.0),
            Some("skills".to_string())
        );
    }

    #[test]
    fn overlapping_spans_resolve_to_the_later_section() {
        let sections = spans(&[("about", 600.0, 800.0), ("skills", 1000.0, 400.0)]);
        // Both spans contain scroll=900; document order gives skills the win.
        assert_eq!(
            active_section_id(Page::Home, &sections, 900.0, 60.0, 800.0),
            Some("skills".to_string())
        );
    }

    #[test]
    fn above_first_section_falls_back_to_home() {
        let sections = spans(&[("about", 600.0, 400.0)]);
        assert_eq!(
            active_section_id(Page::Home, &sections, 0.0, 60.0, 800.0),
            Some("home".to_string())
        );
    }

    #[test]
    fn sectionless_home_page_highlights_home() {
        assert_eq!(
            active_section_id(Page::Home, &[], 0.0, 60.0, 800.0),
            Some("home".to_string())
        );
        assert_eq!(active_section_id(Page::Other, &[], 2000.0, 60.0, 800.0), None);
    }

    #[test]
    fn filter_predicate_matches_all_and_tag_membership() {
        assert!(filter_matches("all", "web ml"));
        assert!(filter_matches("ml", "web ml"));
        assert!(!filter_matches("game", "web ml"));
        assert!(!filter_matches("web", ""));
    }

    #[test]
    fn tilt_rotation_is_proportional_and_bounded() {
        let (rx, ry) = tilt_rotation(150.0, -100.0, 300.0, 200.0);
        assert_eq!(rx, 10.0);
        assert_eq!(ry, 10.0);
        // Pointer confined to the card keeps rotations within ±10 each way.
        let (rx, ry) = tilt_rotation(-150.0, 100.0, 300.0, 200.0);
        assert_eq!(rx, -10.0);
        assert_eq!(ry, -10.0);
    }
}
