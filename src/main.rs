use opengl_by_example::*;

use camera::{
    Camera,
    Projection,
};
use config::Config;
use error::Result;
use input::{
    apply_movement_keys,
    handle_common_keys,
    CursorTracker,
};
use scene::TexturedCubes;

use std::time::Instant;

use glam::Vec3;
use glutin::event::{
    DeviceEvent,
    Event,
    VirtualKeyCode,
    WindowEvent,
};
use winit_input_helper::WinitInputHelper;

struct CameraApp {
    // taken on teardown
    cubes : Option<TexturedCubes>,

    camera : Camera,
    projection : Projection,

    raw_mouse : bool,
    cursor : CursorTracker,

    last_frame : Instant,
    show_overlay : bool,
    clear_color : [f32; 4],

    input : WinitInputHelper,
}

impl CameraApp {
    fn look(&mut self, xoffset : f64, yoffset : f64) {
        if let Err(e) = self.camera.rotate(xoffset, yoffset, true) {
            log::warn!("ignoring mouse movement: {}", e);
        }
    }

    fn handle_mouse(&mut self, event : &Event<'_, ()>) {
        match event {
            Event::DeviceEvent{
                event : DeviceEvent::MouseMotion{ delta : (dx, dy) },
                ..
            } if self.raw_mouse => {
                self.look(*dx, -*dy);
            },
            Event::WindowEvent{
                event : WindowEvent::CursorMoved{ position, .. },
                ..
            } if !self.raw_mouse => {
                let (x, y) = self.cursor.offset(position.x, position.y);
                self.look(x, y);
            },
            Event::WindowEvent{
                event : WindowEvent::Focused(false),
                ..
            } => {
                self.cursor.reset();
            },
            _ => {},
        }
    }
}

impl App for CameraApp {
    fn init(ctx : &mut GraphicsContext, config : &Config) -> Result<Self> {
        ctx.set_title(&format!("{} - camera", config.window.title));
        ctx.grab_cursor(true);

        let camera = Camera::with_options(
            Vec3::from(config.camera.position),
            config.camera.options(),
        );

        Ok(Self{
            cubes : Some(TexturedCubes::new(ctx, config)?),
            camera,
            projection : Projection {
                aspect : ctx.aspect(),
                ..Projection::default()
            },
            raw_mouse : config.camera.raw_mouse,
            cursor : CursorTracker::new(),
            last_frame : Instant::now(),
            show_overlay : false,
            clear_color : config.clear_color,
            input : WinitInputHelper::new(),
        })
    }

    fn update(
        &mut self,
        event : &Event<'_, ()>,
        ctx : &mut GraphicsContext,
        control_flow : &mut glutin::event_loop::ControlFlow,
    ) {
        let mut quit = false;

        self.handle_mouse(event);

        if self.input.update(event) {
            let now = Instant::now();
            let delta = now.duration_since(self.last_frame).as_secs_f32();
            self.last_frame = now;

            quit = handle_common_keys(&self.input, ctx);

            apply_movement_keys(&self.input, &mut self.camera, delta);

            let scroll = self.input.scroll_diff();
            if scroll != 0.0 {
                if let Err(e) = self.camera.zoom_by(scroll) {
                    log::warn!("ignoring scroll: {}", e);
                }
            }

            if self.input.key_pressed(VirtualKeyCode::F1) {
                self.show_overlay = !self.show_overlay;
            }

            if self.input.window_resized().is_some() {
                self.projection.aspect = ctx.aspect();
            }
        }

        if is_redraw_event(event) {
            ctx.clear(self.clear_color);

            if let Some(cubes) = &self.cubes {
                cubes.render(
                    ctx,
                    self.camera.view_matrix(),
                    self.projection.matrix(self.camera.field_of_view()),
                );
            }

            if self.show_overlay {
                let camera = &self.camera;

                ctx.render_egui(|egui_ctx| {
                    egui::Window::new("camera").show(egui_ctx, |ui| {
                        let p = camera.position();
                        ui.label(format!("position {:.2} {:.2} {:.2}", p.x, p.y, p.z));
                        ui.label(format!("yaw {:.1}", camera.yaw()));
                        ui.label(format!("pitch {:.1}", camera.pitch()));
                        ui.label(format!("fov {:.1}", camera.field_of_view()));
                    });
                });
            }

            ctx.swap_buffers();
        }

        if quit {
            *control_flow = glutin::event_loop::ControlFlow::Exit;
        }
    }

    fn destroy(&mut self, ctx : &mut GraphicsContext) {
        ctx.grab_cursor(false);

        if let Some(cubes) = self.cubes.take() {
            cubes.destroy(ctx);
        }
    }
}

fn main() {
    launch::<CameraApp>();
}
