//! Surface materials.

use lumen_math::Vec3;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// How a surface interacts with light.
///
/// The integrator matches on this exhaustively; adding a variant forces every
/// dispatch site to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Material {
    /// Lambertian reflector
    #[default]
    Diffuse,
    /// Perfect specular mirror
    Mirror,
    /// Dielectric with Fresnel-weighted reflection and refraction
    Glass,
    /// Area light surface
    Emissive,
}

impl Material {
    /// Whether surfaces with this material block shadow rays.
    ///
    /// Glass lets light through for visibility tests.
    #[inline]
    pub fn occludes(self) -> bool {
        !matches!(self, Material::Glass)
    }

    /// Whether this material emits light.
    #[inline]
    pub fn is_emissive(self) -> bool {
        matches!(self, Material::Emissive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_glass_is_transparent_to_shadows() {
        assert!(Material::Diffuse.occludes());
        assert!(Material::Mirror.occludes());
        assert!(Material::Emissive.occludes());
        assert!(!Material::Glass.occludes());
    }

    #[test]
    fn test_material_flags() {
        assert!(Material::Emissive.is_emissive());
        assert!(!Material::Diffuse.is_emissive());
        assert_eq!(Material::default(), Material::Diffuse);
    }
}
