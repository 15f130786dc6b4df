use std;
use ini;

use camera;
use graphics;

/// Viewer settings parsed from an ini file.
/// Missing sections and keys fall back to the built-in defaults.
pub struct Settings {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub background: graphics::Color,
    pub point_color: graphics::Color,
    pub face_color: graphics::Color,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            title: "Main Window".to_owned(),
            width: 640,
            height: 480,
            fov: camera::DEFAULT_FOV,
            near: camera::DEFAULT_NEAR,
            far: camera::DEFAULT_FAR,
            background: graphics::Color::white(),
            point_color: graphics::Color::blue(),
            face_color: graphics::Color::green(),
        }
    }
}

impl Settings {
    pub fn load(filename: &str) -> Settings {
        Settings::from_ini(&load_config(filename))
    }

    pub fn from_ini(config: &ini::Ini) -> Settings {
        let mut settings = Settings::default();

        if let Some(window) = config.section(Some("window")) {
            if let Some(value) = window.get("title") {
                settings.title = value.clone();
            }

            if let Some(value) = window.get("width") {
                settings.width = parse_setting("width", value);
            }

            if let Some(value) = window.get("height") {
                settings.height = parse_setting("height", value);
            }
        }

        if let Some(camera) = config.section(Some("camera")) {
            if let Some(value) = camera.get("fov") {
                settings.fov = parse_setting("fov", value);
            }

            if let Some(value) = camera.get("near") {
                settings.near = parse_setting("near", value);
            }

            if let Some(value) = camera.get("far") {
                settings.far = parse_setting("far", value);
            }
        }

        if let Some(colors) = config.section(Some("colors")) {
            if let Some(value) = colors.get("background") {
                settings.background = parse_color("background", value);
            }

            if let Some(value) = colors.get("points") {
                settings.point_color = parse_color("points", value);
            }

            if let Some(value) = colors.get("faces") {
                settings.face_color = parse_color("faces", value);
            }
        }

        settings
    }
}

pub fn load_config(filename: &str) -> ini::Ini {
    match ini::Ini::load_from_file(filename) {
        Ok(result) => result,
        Err(err) => panic!("{}", err.msg),
    }
}

fn parse_setting<T>(name: &str, value: &str) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value.parse() {
        Ok(result) => result,
        Err(err) => panic!("Invalid value for \"{}\": {}", name, err),
    }
}

// Colors are written as three space-separated channels, e.g. "1 0 0"
fn parse_color(name: &str, value: &str) -> graphics::Color {
    let channels: Vec<f32> = value.split_whitespace()
        .map(|channel| parse_setting(name, channel))
        .collect();

    if channels.len() != 3 {
        panic!("Invalid value for \"{}\": expected three channels", name);
    }

    graphics::Color::new(channels[0], channels[1], channels[2])
}
