//! Primitive storage sizes. A primitive's alignment equals its size.

use crate::model::Configuration;

/// Size in bytes of a primitive type under a configuration, `None` when the
/// type is not primitive
pub fn primitive_size(ty: &str, configuration: &Configuration) -> Option<u32> {
    let size = match ty {
        "bool" | "int8" | "uint8" => 1,
        "int16" | "uint16" => 2,
        "int32" | "uint32" | "float" => 4,
        "int" | "int64" | "uint64" | "double" => 8,
        "real" | "real_t" => configuration.real_size,
        "pointer" => configuration.pointer_size,
        _ => return None,
    };
    Some(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(real_size: u32, pointer_size: u32) -> Configuration {
        Configuration {
            name: "test".into(),
            real_size,
            pointer_size,
        }
    }

    #[test]
    fn test_fixed_width_primitives() {
        let c = config(4, 8);
        assert_eq!(primitive_size("bool", &c), Some(1));
        assert_eq!(primitive_size("uint16", &c), Some(2));
        assert_eq!(primitive_size("float", &c), Some(4));
        assert_eq!(primitive_size("int", &c), Some(8));
    }

    #[test]
    fn test_configuration_dependent_primitives() {
        assert_eq!(primitive_size("real", &config(4, 4)), Some(4));
        assert_eq!(primitive_size("real_t", &config(8, 4)), Some(8));
        assert_eq!(primitive_size("pointer", &config(8, 4)), Some(4));
    }

    #[test]
    fn test_non_primitive() {
        let c = config(4, 4);
        assert_eq!(primitive_size("Vector2", &c), None);
        assert_eq!(primitive_size("Variant", &c), None);
    }
}
