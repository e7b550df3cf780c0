pub mod camera;

pub mod config;
use config::Config;

pub mod error;
use error::{
    Error,
    Result,
    ShaderStage,
};

pub mod input;

pub mod utils;
use utils::{
    create_display,
    GlutinContext,
    Rollback,
};

pub mod program;
use program::{
    LoadedProg,
    UniformSetter,
};

pub mod object;
use object::{
    LoadedMesh,
    Mesh,
};

pub mod texture;

pub mod scene;

use std::path::Path;

use glow::HasContext;

pub struct GraphicsContext {
    gl : glow::Context,
    gl_window : GlutinContext,
    egui : egui_glow::EguiGlow,
}

impl GraphicsContext {
    pub fn render_egui<T>(
        &mut self,
        mut f : impl FnMut(&egui::CtxRef) -> T
    ) -> T {
        self.egui.begin_frame(self.gl_window.window());

        let ret = (f)(self.egui.ctx());

        let (needs_repaint, shapes) = self.egui.end_frame(
            self.gl_window.window()
        );

        if needs_repaint {
            self.gl_window.window().request_redraw();
        }

        self.egui.paint(&self.gl_window, &self.gl, shapes);

        ret
    }

    pub fn set_title(&self, s : &str) {
        self.gl_window.window().set_title(s);
    }

    pub fn aspect(&self) -> f32 {
        let (width, height) = self.physical_size();

        if height == 0 {
            1.0
        } else {
            (width as f32) / (height as f32)
        }
    }

    pub fn physical_size(&self) -> (u32, u32) {
        let size = self.gl_window.window().inner_size();

        (size.width, size.height)
    }

    fn resize(&self, size : glutin::dpi::PhysicalSize<u32>) {
        self.gl_window.resize(size);

        unsafe {
            self.gl.viewport(0, 0, size.width as i32, size.height as i32);
        }
    }

    /// Hides the cursor and keeps it inside the window so mouse motion can
    /// drive the camera.
    pub fn grab_cursor(&self, grab : bool) {
        let window = self.gl_window.window();

        if let Err(e) = window.set_cursor_grab(grab) {
            log::warn!("could not grab cursor: {}", e);
        }

        window.set_cursor_visible(!grab);
    }

    pub fn swap_buffers(&self) {
        if let Err(e) = self.gl_window.swap_buffers() {
            log::error!("swap buffers: {}", e);
        }
    }

    pub fn load_mesh(&self, mesh : &Mesh) -> Result<LoadedMesh> {
        let gl = &self.gl;

        unsafe {
            let vao = gl.create_vertex_array().map_err(Error::Gl)?;
            let vao_guard = Rollback::new(move || gl.delete_vertex_array(vao));
            gl.bind_vertex_array(Some(vao));

            let vbo = gl.create_buffer().map_err(Error::Gl)?;
            let vbo_guard = Rollback::new(move || gl.delete_buffer(vbo));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&mesh.vertices),
                glow::STATIC_DRAW,
            );

            let mut ebo = None;
            let mut ebo_guard = None;

            if let Some(indices) = &mesh.indices {
                let buf = gl.create_buffer().map_err(Error::Gl)?;
                ebo_guard = Some(Rollback::new(move || gl.delete_buffer(buf)));
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(buf));
                gl.buffer_data_u8_slice(
                    glow::ELEMENT_ARRAY_BUFFER,
                    bytemuck::cast_slice(indices),
                    glow::STATIC_DRAW,
                );
                ebo = Some(buf);
            }

            let stride = mesh.stride() as i32;

            for (attr, offset) in mesh.layout() {
                gl.vertex_attrib_pointer_f32(
                    attr.location,
                    attr.components as i32,
                    glow::FLOAT,
                    false,
                    stride,
                    offset as i32,
                );
                gl.enable_vertex_attrib_array(attr.location);
            }

            // the element buffer binding is part of the VAO state, so only
            // the array buffer is unbound
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            error_check(gl)?;

            vao_guard.disarm();
            vbo_guard.disarm();
            if let Some(guard) = ebo_guard {
                guard.disarm();
            }

            Ok(LoadedMesh{
                vao,
                vbo,
                ebo,
                count : mesh.draw_count(),
            })
        }
    }

    pub fn unload_mesh(&self, mesh : LoadedMesh) {
        unsafe {
            self.gl.delete_vertex_array(mesh.vao);
            self.gl.delete_buffer(mesh.vbo);
            if let Some(ebo) = mesh.ebo {
                self.gl.delete_buffer(ebo);
            }
        }
    }

    pub fn draw_mesh(&self, mesh : &LoadedMesh) {
        unsafe {
            self.gl.bind_vertex_array(Some(mesh.vao));

            if mesh.ebo.is_some() {
                self.gl.draw_elements(
                    glow::TRIANGLES,
                    mesh.count as i32,
                    glow::UNSIGNED_INT,
                    0,
                );
            } else {
                self.gl.draw_arrays(glow::TRIANGLES, 0, mesh.count as i32);
            }

            self.gl.bind_vertex_array(None);
        }
    }

    fn compile_shader(
        &self,
        stage : ShaderStage,
        src : &str,
    ) -> Result<glow::NativeShader> {
        log::info!("compiling {} shader", stage);

        unsafe {
            let shader = self.gl.create_shader(stage.gl_type())
                .map_err(Error::Gl)?;
            self.gl.shader_source(shader, src);
            self.gl.compile_shader(shader);

            if !self.gl.get_shader_compile_status(shader) {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                return Err(Error::ShaderCompile{ stage, log });
            }

            Ok(shader)
        }
    }

    pub fn load_program(
        &self,
        vert_src : &str,
        frag_src : &str,
    ) -> Result<LoadedProg> {
        let gl = &self.gl;

        // the shader objects are only needed until the program is linked,
        // they go away on every path out of here
        let vert = self.compile_shader(ShaderStage::Vertex, vert_src)?;
        let _vert_guard = Rollback::new(move || unsafe {
            gl.delete_shader(vert);
        });

        let frag = self.compile_shader(ShaderStage::Fragment, frag_src)?;
        let _frag_guard = Rollback::new(move || unsafe {
            gl.delete_shader(frag);
        });

        log::info!("linking program");
        let prog;
        unsafe {
            prog = gl.create_program().map_err(Error::Gl)?;
            gl.attach_shader(prog, vert);
            gl.attach_shader(prog, frag);
            gl.link_program(prog);

            gl.detach_shader(prog, vert);
            gl.detach_shader(prog, frag);

            if !gl.get_program_link_status(prog) {
                let log = gl.get_program_info_log(prog);
                gl.delete_program(prog);
                return Err(Error::ProgramLink(log));
            }
        }

        let n = unsafe {
            self.gl.get_active_uniforms(prog)
        };

        let mut active_uniforms = Vec::with_capacity(n as usize);

        for i in 0..n {
            let u = match unsafe { self.gl.get_active_uniform(prog, i) } {
                Some(u) => u,
                None => continue,
            };

            log::debug!("uniform name: {}", u.name);

            let loc = unsafe {
                self.gl.get_uniform_location(prog, &u.name)
            };

            if let Some(loc) = loc {
                active_uniforms.push((u, loc));
            }
        }

        active_uniforms.sort_unstable_by(|left, right| {
            left.0.name.cmp(&right.0.name)
        });

        Ok(LoadedProg{
            prog,
            active_uniforms: active_uniforms.into_boxed_slice().into(),
        })
    }

    /// Reads both shader sources from disk, then behaves like
    /// `load_program`.
    pub fn load_program_files(
        &self,
        vert_path : &Path,
        frag_path : &Path,
    ) -> Result<LoadedProg> {
        self.load_program(
            &program::read_source(vert_path)?,
            &program::read_source(frag_path)?,
        )
    }

    pub fn unload_program(
        &self,
        prog : &LoadedProg,
    ) {
        unsafe {
            self.gl.delete_program(prog.prog);
        }
    }

    /// Makes `prog` the current program and returns a setter for its
    /// uniforms.
    pub fn use_program<'a>(&'a self, prog : &'a LoadedProg) -> UniformSetter<'a> {
        unsafe {
            self.gl.use_program(Some(prog.prog));
        }

        UniformSetter{
            gl : &self.gl,
            prog,
        }
    }

    fn set_texture_parameters(&self) {
        unsafe {
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );

            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );

            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::REPEAT as i32,
            );

            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::REPEAT as i32,
            );
        }
    }

    pub fn texture_2d_image(
        &self,
        img : &image::RgbaImage,
    ) -> Result<glow::NativeTexture> {
        let gl = &self.gl;

        unsafe {
            let tex = gl.create_texture().map_err(Error::Gl)?;
            let guard = Rollback::new(move || gl.delete_texture(tex));
            self.gl.bind_texture(glow::TEXTURE_2D, Some(tex));

            self.set_texture_parameters();

            self.gl.tex_image_2d(
                glow::TEXTURE_2D, // target
                0, // level
                glow::RGBA as i32, // internalformat
                img.width() as i32,
                img.height() as i32,
                0, // border
                glow::RGBA, // format
                glow::UNSIGNED_BYTE, // type
                Some(img.as_raw()), // data
            );

            self.gl.generate_mipmap(glow::TEXTURE_2D);

            self.gl.bind_texture(glow::TEXTURE_2D, None);

            error_check(gl)?;
            guard.disarm();

            Ok(tex)
        }
    }

    pub fn bind_texture(&self, unit : u32, tex : glow::NativeTexture) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(tex));
        }
    }

    pub fn unload_texture(&self, tex : glow::NativeTexture) {
        unsafe {
            self.gl.delete_texture(tex);
        }
    }

    pub fn clear(&self, [r, g, b, a] : [f32; 4]) {
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    pub fn enable_depth_test(&self) {
        unsafe {
            self.gl.enable(glow::DEPTH_TEST);
        }
    }

    pub fn set_wireframe(&self, wireframe : bool) {
        let mode = if wireframe { glow::LINE } else { glow::FILL };

        unsafe {
            self.gl.polygon_mode(glow::FRONT_AND_BACK, mode);
        }
    }

    /// major, minor
    pub fn gl_version(&self) -> (i32, i32) {
        unsafe {
            let major = self.gl.get_parameter_i32(
                glow::MAJOR_VERSION,
            );

            let minor = self.gl.get_parameter_i32(
                glow::MINOR_VERSION,
            );

            (major, minor)
        }
    }
}

pub(crate) fn error_check(gl : &glow::Context) -> Result<()> {
    match unsafe { gl.get_error() } {
        glow::NO_ERROR => Ok(()),
        code => Err(Error::Gl(format!("error code {:#x}", code))),
    }
}

pub trait App {
    // load shaders, textures, etc.
    fn init(ctx : &mut GraphicsContext, config : &Config) -> Result<Self>
    where
        Self : Sized;

    // handle input, render when asked to
    fn update(
        &mut self,
        event : &glutin::event::Event<'_, ()>,
        ctx : &mut GraphicsContext,
        control_flow : &mut glutin::event_loop::ControlFlow,
    );

    // release GL objects, the context is still current
    fn destroy(&mut self, _ctx : &mut GraphicsContext) {}
}

pub fn is_redraw_event<T>(event : &glutin::event::Event<'_, T>) -> bool {
    matches!(event, glutin::event::Event::RedrawRequested(_))
}

/// Opens the window described by `config` and drives `A` until the window
/// closes. Only returns if setting up fails.
pub fn run<A : App + 'static>(config : Config) -> Result<()> {
    let event_loop = glutin::event_loop::EventLoop::new();
    let (gl_window, gl) = create_display(&event_loop, &config.window)?;

    let egui = egui_glow::EguiGlow::new(&gl_window, &gl);

    let mut render_ctx = GraphicsContext {
        gl, gl_window, egui
    };

    let (major, minor) = render_ctx.gl_version();
    log::info!("OpenGL version: {}.{}", major, minor);

    let mut a = A::init(&mut render_ctx, &config)?;

    event_loop.run(move |event, _, control_flow| {
        use glutin::event::{Event, WindowEvent};
        use glutin::event_loop::ControlFlow;

        if *control_flow != ControlFlow::Exit {
            *control_flow = ControlFlow::Poll;
        }

        match &event {
            Event::WindowEvent{ event, .. } => {
                if render_ctx.egui.is_quit_event(event) {
                    *control_flow = ControlFlow::Exit;
                }

                if let WindowEvent::Resized(physical_size) = event {
                    render_ctx.resize(*physical_size);
                }

                render_ctx.egui.on_event(event);
            },
            // render continuously, movement depends on held keys
            Event::MainEventsCleared => {
                render_ctx.gl_window.window().request_redraw();
            },
            _ => {},
        }

        if let Event::LoopDestroyed = event {
            a.destroy(&mut render_ctx);
            render_ctx.egui.destroy(&render_ctx.gl);
            return;
        }

        a.update(&event, &mut render_ctx, control_flow);
    });
}

/// Entry point shared by the binaries: logging, config, then `run`.
pub fn launch<A : App + 'static>() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    if let Err(e) = Config::load().and_then(run::<A>) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
