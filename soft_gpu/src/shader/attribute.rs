/// Vertex/fragment attribute values
///
/// Attributes behave like untyped GPU registers: a value written as one type
/// can be read back as another, with missing components reading as zero.
/// Interpolation and clipping work on the four-component view.

use glam::{Vec2, Vec3, Vec4};

// ===== ATTRIBUTE TYPE =====

/// Data type of one attribute slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeType {
    /// Slot unused
    #[default]
    Empty,
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl AttributeType {
    /// Size in bytes when read from a buffer (tightly packed f32 components)
    pub fn size_bytes(&self) -> u64 {
        self.component_count() as u64 * 4
    }

    /// Number of f32 components
    pub fn component_count(&self) -> usize {
        match self {
            AttributeType::Empty => 0,
            AttributeType::Float => 1,
            AttributeType::Vec2 => 2,
            AttributeType::Vec3 => 3,
            AttributeType::Vec4 => 4,
        }
    }
}

// ===== ATTRIBUTE =====

/// One attribute value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Attribute {
    #[default]
    Empty,
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
}

impl Attribute {
    /// Type tag of the stored value
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Attribute::Empty => AttributeType::Empty,
            Attribute::Float(_) => AttributeType::Float,
            Attribute::Vec2(_) => AttributeType::Vec2,
            Attribute::Vec3(_) => AttributeType::Vec3,
            Attribute::Vec4(_) => AttributeType::Vec4,
        }
    }

    /// Four-component view, zero padded
    pub fn components(&self) -> Vec4 {
        match *self {
            Attribute::Empty => Vec4::ZERO,
            Attribute::Float(v) => Vec4::new(v, 0.0, 0.0, 0.0),
            Attribute::Vec2(v) => v.extend(0.0).extend(0.0),
            Attribute::Vec3(v) => v.extend(0.0),
            Attribute::Vec4(v) => v,
        }
    }

    /// Build a value of `ty` from the first components of `c`
    pub fn from_components(ty: AttributeType, c: Vec4) -> Self {
        match ty {
            AttributeType::Empty => Attribute::Empty,
            AttributeType::Float => Attribute::Float(c.x),
            AttributeType::Vec2 => Attribute::Vec2(c.truncate().truncate()),
            AttributeType::Vec3 => Attribute::Vec3(c.truncate()),
            AttributeType::Vec4 => Attribute::Vec4(c),
        }
    }

    /// Decode a value of `ty` from little-endian packed f32 bytes
    ///
    /// `bytes` must hold exactly `ty.size_bytes()` bytes.
    pub fn from_bytes(ty: AttributeType, bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len() as u64, ty.size_bytes());
        match ty {
            AttributeType::Empty => Attribute::Empty,
            AttributeType::Float => Attribute::Float(bytemuck::pod_read_unaligned::<f32>(bytes)),
            AttributeType::Vec2 => {
                Attribute::Vec2(Vec2::from_array(bytemuck::pod_read_unaligned::<[f32; 2]>(bytes)))
            }
            AttributeType::Vec3 => {
                Attribute::Vec3(Vec3::from_array(bytemuck::pod_read_unaligned::<[f32; 3]>(bytes)))
            }
            AttributeType::Vec4 => {
                Attribute::Vec4(Vec4::from_array(bytemuck::pod_read_unaligned::<[f32; 4]>(bytes)))
            }
        }
    }

    // ===== REINTERPRETING ACCESSORS =====

    pub fn as_f32(&self) -> f32 {
        self.components().x
    }

    pub fn as_vec2(&self) -> Vec2 {
        self.components().truncate().truncate()
    }

    pub fn as_vec3(&self) -> Vec3 {
        self.components().truncate()
    }

    pub fn as_vec4(&self) -> Vec4 {
        self.components()
    }

    // ===== INTERPOLATION =====

    /// Linear interpolation `self + t * (other - self)`
    ///
    /// The result keeps the type of `self`, or of `other` when `self` is empty.
    pub fn lerp(&self, other: &Attribute, t: f32) -> Attribute {
        let ty = match self.attribute_type() {
            AttributeType::Empty => other.attribute_type(),
            ty => ty,
        };
        let a = self.components();
        let b = other.components();
        Attribute::from_components(ty, a + (b - a) * t)
    }

    /// Weighted sum of three values, produced as type `ty`
    pub fn weighted(ty: AttributeType, values: [&Attribute; 3], weights: Vec3) -> Attribute {
        if ty == AttributeType::Empty {
            return Attribute::Empty;
        }
        let sum = values[0].components() * weights.x
            + values[1].components() * weights.y
            + values[2].components() * weights.z;
        Attribute::from_components(ty, sum)
    }
}

impl From<f32> for Attribute {
    fn from(v: f32) -> Self {
        Attribute::Float(v)
    }
}

impl From<Vec2> for Attribute {
    fn from(v: Vec2) -> Self {
        Attribute::Vec2(v)
    }
}

impl From<Vec3> for Attribute {
    fn from(v: Vec3) -> Self {
        Attribute::Vec3(v)
    }
}

impl From<Vec4> for Attribute {
    fn from(v: Vec4) -> Self {
        Attribute::Vec4(v)
    }
}

#[cfg(test)]
#[path = "attribute_tests.rs"]
mod tests;
