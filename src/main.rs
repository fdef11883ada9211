// src/main.rs
use log::{error, info};
use nannou::prelude::*;
use std::path::PathBuf;

use strokeview::{
    config::*,
    controllers::{
        apply_command, char_command, key_command, ControlAction, ControlCommand, KeyboardSteps,
        OscController,
    },
    models::Session,
    services::{export_svg, ExportError, SvgCanvas, TrajectoryClient},
    views::{draw_alert, draw_status, CanvasStrip},
};

const LABEL_COLOR: (f32, f32, f32) = (0.2, 0.2, 0.2);

struct Model {
    // Core components:
    session: Session,
    strip: CanvasStrip,
    background: Rgb<f32>,

    // Comms components:
    client: TrajectoryClient,
    osc_controller: Option<OscController>,

    // Input
    steps: KeyboardSteps,

    // Export
    svg_canvas: SvgCanvas,
    export_dir: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    // Load config
    let config = Config::load().expect("Failed to load config file");

    // Create OSC controller; the viewer still works without it
    let osc_controller = match OscController::new(config.osc.rx_port) {
        Ok(controller) => {
            info!("Listening for OSC on port {}", config.osc.rx_port);
            Some(controller)
        }
        Err(e) => {
            error!("OSC disabled, could not bind port {}: {}", config.osc.rx_port, e);
            None
        }
    };

    // Create window
    app.new_window()
        .title("strokeview")
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .received_character(received_character)
        .build()
        .unwrap();

    let session = Session::new(config.backend.default_text.clone(), config.render_config());
    let client = TrajectoryClient::new(&config.backend, config.render.tag_policy);

    Model {
        session,
        strip: CanvasStrip::new(config.canvas.clone()),
        background: config.window_background(),

        client,
        osc_controller,

        steps: KeyboardSteps {
            scale: config.render.scale_step,
            stroke_width: config.render.stroke_width_step,
        },

        svg_canvas: SvgCanvas {
            width: config.canvas.width,
            height: config.canvas.height,
            background: config.canvas_background(),
        },
        export_dir: config.resolve_output_dir(),
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if let Some(command) = key_command(key, model.steps) {
        handle_command(model, command);
    }
}

fn received_character(_app: &App, model: &mut Model, c: char) {
    if let Some(command) = char_command(c) {
        handle_command(model, command);
    }
}

fn update(_app: &App, model: &mut Model, _update: Update) {
    // Process OSC messages
    if let Some(osc_controller) = model.osc_controller.as_mut() {
        osc_controller.process_messages();
    }
    launch_commands(model);

    // Finished fetches, in arrival order
    for result in model.client.poll() {
        match result.outcome {
            Ok(response) => model.session.replace_trajectories(response),
            Err(e) => model
                .session
                .show_alert(format!("Error fetching trajectories for \"{}\": {}", result.text, e)),
        }
    }

    model.strip.sync(&model.session);
}

// Draw the state of Model into the given Frame
fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(model.background);

    let window = app.window_rect();
    let area = draw_status(&draw, window, &model.session, model.client.in_flight());
    let (r, g, b) = LABEL_COLOR;
    model.strip.draw(&draw, area, rgb(r, g, b));

    if let Some(message) = model.session.alert() {
        draw_alert(&draw, window, message);
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        error!("Failed to draw frame: {:?}", e);
    }
}

fn launch_commands(model: &mut Model) {
    let commands = match model.osc_controller.as_mut() {
        Some(osc_controller) => osc_controller.take_commands(),
        None => return,
    };
    for command in commands {
        handle_command(model, command);
    }
}

fn handle_command(model: &mut Model, command: ControlCommand) {
    match apply_command(&mut model.session, command) {
        ControlAction::None => (),
        ControlAction::Fetch(text) => {
            model.client.request(&text);
        }
        ControlAction::Export => export(model),
    }
}

fn export(model: &mut Model) {
    let result = match model.session.trajectories() {
        Some(response) => export_svg(
            response,
            model.session.render_config(),
            model.svg_canvas,
            &model.export_dir,
        ),
        None => Err(ExportError::NothingToExport),
    };

    match result {
        Ok(paths) => info!("Wrote {} file(s) to {}", paths.len(), model.export_dir.display()),
        Err(e) => model.session.show_alert(format!("Export failed: {}", e)),
    }
}
