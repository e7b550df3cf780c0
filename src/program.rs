use glow::HasContext;
use quick_from::QuickFrom;
use std::rc::Rc;

use crate::error::{
    Error,
    Result,
};

pub struct LoadedProg {
    pub(crate) prog : glow::NativeProgram,
    pub(crate) active_uniforms : Rc<[(glow::ActiveUniform, glow::UniformLocation)]>,
}

impl LoadedProg {
    pub(crate) fn find_active_uniform(
        &self,
        name : &str
    ) -> Option<&(glow::ActiveUniform, glow::UniformLocation)> {
        self.active_uniforms.binary_search_by_key(
            &name,
            |v| &v.0.name
        ).ok().map(|idx| &self.active_uniforms[idx])
    }
}

pub trait Uniforms {
    fn set_uniforms(&self, setter : &mut UniformSetter<'_>);
}

impl<T> Uniforms for &[(&str, T)]
where
    T : Into<UniformValue> + Clone
{
    fn set_uniforms(&self, setter : &mut UniformSetter<'_>) {
        for (name, val) in self.iter().cloned() {
            setter.set(name, val)
        }
    }
}

#[derive(QuickFrom, Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    #[quick_from]
    Int(i32),

    #[quick_from]
    Uint(u32),

    #[quick_from]
    Bool(bool),

    #[quick_from]
    Float(f32),

    #[quick_from]
    Vec2(glam::Vec2),
    #[quick_from]
    Vec3(glam::Vec3),
    #[quick_from]
    Vec4(glam::Vec4),

    #[quick_from]
    Mat3(glam::Mat3),
    #[quick_from]
    Mat4(glam::Mat4),
}

impl UniformValue {
    /// Whether a value of this kind can be written to a uniform of GL type
    /// `utype`. Samplers are set through their texture unit.
    pub(crate) fn accepts(&self, utype : u32) -> bool {
        use UniformValue::*;

        match self {
            Int(_) => matches!(
                utype,
                glow::INT | glow::BOOL | glow::SAMPLER_2D | glow::SAMPLER_2D_ARRAY
            ),
            Uint(_) => utype == glow::UNSIGNED_INT,
            Bool(_) => matches!(utype, glow::BOOL | glow::INT),
            Float(_) => utype == glow::FLOAT,

            Vec2(_) => utype == glow::FLOAT_VEC2,
            Vec3(_) => utype == glow::FLOAT_VEC3,
            Vec4(_) => utype == glow::FLOAT_VEC4,

            Mat3(_) => utype == glow::FLOAT_MAT3,
            Mat4(_) => utype == glow::FLOAT_MAT4,
        }
    }

    pub(crate) fn set_uniform(
        self,
        gl : &glow::Context,
        loc : &glow::UniformLocation
    ) {
        use UniformValue::*;

        unsafe {
        match self {
            Int(val) =>  {
                gl.uniform_1_i32(Some(loc), val)
            },
            Uint(val) =>  {
                gl.uniform_1_u32(Some(loc), val)
            },
            Bool(val) =>  {
                gl.uniform_1_i32(Some(loc), if val { 1 } else { 0 })
            },
            Float(val) =>  {
                gl.uniform_1_f32(Some(loc), val)
            },
            Vec2(val) =>  {
                gl.uniform_2_f32_slice(
                    Some(loc),
                    bytemuck::cast_slice(&[val])
                )
            },
            Vec3(val) =>  {
                gl.uniform_3_f32_slice(
                    Some(loc),
                    bytemuck::cast_slice(&[val])
                )
            },
            Vec4(val) =>  {
                gl.uniform_4_f32_slice(
                    Some(loc),
                    bytemuck::cast_slice(&[val])
                )
            },
            Mat3(val) =>  {
                gl.uniform_matrix_3_f32_slice(
                    Some(loc),
                    false,
                    bytemuck::cast_slice(&[val])
                )
            },
            Mat4(val) =>  {
                gl.uniform_matrix_4_f32_slice(
                    Some(loc),
                    false,
                    bytemuck::cast_slice(&[val])
                )
            },
        }
        }
    }
}

/// Writes uniforms of a program that is currently in use, see
/// `GraphicsContext::use_program`.
pub struct UniformSetter<'a> {
    pub(crate) gl : &'a glow::Context,
    pub(crate) prog : &'a LoadedProg,
}

impl<'a> UniformSetter<'a> {
    /// Unknown names are only logged: the driver drops uniforms the shader
    /// never reads, so a missing one is not necessarily a mistake.
    pub fn set<V>(&self, name : &str, val : V)
    where
        V : Into<UniformValue>
    {
        let val : UniformValue = val.into();

        let meta = match self.prog.find_active_uniform(name) {
            Some(v) => v,
            None => {
                log::warn!("no active uniform {}", name);
                return;
            }
        };

        if !val.accepts(meta.0.utype) {
            log::warn!(
                "uniform {} has type {:#x}, cannot set {:?}",
                name,
                meta.0.utype,
                val,
            );
            return;
        }

        val.set_uniform(self.gl, &meta.1);

        if let Err(e) = crate::error_check(self.gl) {
            log::error!("setting uniform {}: {}", name, e);
        }
    }

    pub fn set_bool(&self, name : &str, val : bool) {
        self.set(name, val)
    }

    pub fn set_int(&self, name : &str, val : i32) {
        self.set(name, val)
    }

    pub fn set_float(&self, name : &str, val : f32) {
        self.set(name, val)
    }

    pub fn set_vec3(&self, name : &str, val : glam::Vec3) {
        self.set(name, val)
    }

    pub fn set_mat4(&self, name : &str, val : glam::Mat4) {
        self.set(name, val)
    }
}

/// Reads a shader source file, the error names the path.
pub fn read_source(path : &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path : path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(UniformValue::from(3i32), UniformValue::Int(3));
        assert_eq!(UniformValue::from(true), UniformValue::Bool(true));
        assert_eq!(UniformValue::from(0.5f32), UniformValue::Float(0.5));
        assert_eq!(
            UniformValue::from(glam::Mat4::IDENTITY),
            UniformValue::Mat4(glam::Mat4::IDENTITY),
        );
    }

    #[test]
    fn samplers_take_texture_units() {
        assert!(UniformValue::Int(1).accepts(glow::SAMPLER_2D));
        assert!(!UniformValue::Float(1.0).accepts(glow::SAMPLER_2D));
    }

    #[test]
    fn type_mismatch() {
        assert!(UniformValue::Mat4(glam::Mat4::IDENTITY).accepts(glow::FLOAT_MAT4));
        assert!(!UniformValue::Mat4(glam::Mat4::IDENTITY).accepts(glow::FLOAT_MAT3));
        assert!(!UniformValue::Vec3(glam::Vec3::ONE).accepts(glow::FLOAT_VEC4));
        assert!(UniformValue::Bool(true).accepts(glow::BOOL));
    }

    #[test]
    fn sources_read_from_disk() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("src/shaders");

        let frag = read_source(&dir.join("triangle.frag")).unwrap();
        assert!(frag.contains("uniform vec3 tint;"));
        assert!(frag.contains("uniform bool grayscale;"));

        let missing = dir.join("missing.frag");
        match read_source(&missing) {
            Err(Error::Io{ path, .. }) => assert_eq!(path, missing),
            other => panic!("expected an io error, got {:?}", other),
        }
    }
}
