//! Human-readable rendering of types and signatures

use crate::model::{
    ConstructorSpec, MethodEntity, OperatorSpec, Parameter, PropertySpec, SignalSpec,
    UtilityFunction,
};

/// Display form of a document type string
///
/// `typedarray::T` → `Array<T>`, `enum::T` and `bitfield::T` → `T`, absent
/// or empty → `void`.
pub fn format_type(ty: Option<&str>) -> String {
    let Some(ty) = ty.filter(|t| !t.is_empty()) else {
        return "void".to_string();
    };
    if let Some(inner) = ty.strip_prefix("typedarray::") {
        return format!("Array<{}>", inner);
    }
    ty.strip_prefix("enum::")
        .or_else(|| ty.strip_prefix("bitfield::"))
        .unwrap_or(ty)
        .to_string()
}

pub fn format_parameter(parameter: &Parameter) -> String {
    let ty = format_type(Some(&parameter.ty));
    let mut out = if parameter.name.is_empty() {
        ty
    } else {
        format!("{} {}", ty, parameter.name)
    };
    if let Some(default) = &parameter.default_value {
        out.push('=');
        out.push_str(default);
    }
    out
}

fn format_parameters(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(format_parameter)
        .collect::<Vec<_>>()
        .join(", ")
}

fn bracketed(labels: &[String]) -> String {
    if labels.is_empty() {
        String::new()
    } else {
        format!(" [{}]", labels.join(", "))
    }
}

/// `ret Owner::name(type arg=default, ...) [static, const, virtual, vararg]`
pub fn method_signature(method: &MethodEntity) -> String {
    let ret = format_type(method.return_value.as_ref().map(|r| r.ty.as_str()));
    let flags: Vec<String> = method
        .flags
        .labels()
        .into_iter()
        .map(str::to_string)
        .collect();
    format!(
        "{} {}::{}({}){}",
        ret,
        method.owner.name,
        method.name,
        format_parameters(&method.parameters),
        bracketed(&flags)
    )
}

pub fn utility_signature(utility: &UtilityFunction) -> String {
    let flags = if utility.is_vararg {
        vec!["vararg".to_string()]
    } else {
        Vec::new()
    };
    format!(
        "{} {}({}){}",
        format_type(utility.return_type.as_deref()),
        utility.name,
        format_parameters(&utility.arguments),
        bracketed(&flags)
    )
}

/// `type name [get=getter, set=setter, index=i]`
pub fn property_signature(property: &PropertySpec) -> String {
    let mut extra = Vec::new();
    if let Some(getter) = property.getter.as_deref().filter(|g| !g.is_empty()) {
        extra.push(format!("get={}", getter));
    }
    if let Some(setter) = property.setter.as_deref().filter(|s| !s.is_empty()) {
        extra.push(format!("set={}", setter));
    }
    if let Some(index) = property.index {
        extra.push(format!("index={}", index));
    }
    format!(
        "{} {}{}",
        format_type(Some(&property.ty)),
        property.name,
        bracketed(&extra)
    )
}

pub fn signal_signature(signal: &SignalSpec) -> String {
    format!(
        "signal {}({})",
        signal.name,
        format_parameters(&signal.arguments)
    )
}

pub fn constructor_signature(builtin: &str, constructor: &ConstructorSpec) -> String {
    format!("{}({})", builtin, format_parameters(&constructor.arguments))
}

/// `Vector2 + Vector2 -> Vector2`, or `unary- Vector2 -> Vector2` for unary operators
pub fn operator_signature(builtin: &str, operator: &OperatorSpec) -> String {
    match &operator.right_type {
        Some(right) => format!(
            "{} {} {} -> {}",
            builtin, operator.name, right, operator.return_type
        ),
        None => format!("{} {} -> {}", operator.name, builtin, operator.return_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MethodFlags, MethodOwner, OwnerKind, ReturnValue};

    fn param(name: &str, ty: &str, default: Option<&str>) -> Parameter {
        Parameter {
            name: name.into(),
            ty: ty.into(),
            meta: None,
            default_value: default.map(str::to_string),
        }
    }

    #[test]
    fn test_format_type() {
        assert_eq!(format_type(Some("typedarray::Node")), "Array<Node>");
        assert_eq!(format_type(Some("enum::Node.ProcessMode")), "Node.ProcessMode");
        assert_eq!(format_type(Some("bitfield::MouseButtonMask")), "MouseButtonMask");
        assert_eq!(format_type(Some("int")), "int");
        assert_eq!(format_type(None), "void");
        assert_eq!(format_type(Some("")), "void");
    }

    #[test]
    fn test_method_signature_with_defaults_and_flags() {
        let mut method = MethodEntity::new(
            MethodOwner {
                kind: OwnerKind::Class,
                name: "Node".into(),
            },
            "add_child",
        );
        method.parameters = vec![
            param("node", "Node", None),
            param("force_readable_name", "bool", Some("false")),
            param("internal", "enum::Node.InternalMode", Some("0")),
        ];
        assert_eq!(
            method_signature(&method),
            "void Node::add_child(Node node, bool force_readable_name=false, Node.InternalMode internal=0)"
        );

        method.flags = MethodFlags {
            is_const: true,
            is_static: false,
            is_virtual: true,
            is_vararg: false,
        };
        method.return_value = Some(ReturnValue {
            ty: "int".into(),
            meta: Some("int32".into()),
        });
        method.parameters.clear();
        assert_eq!(method_signature(&method), "int Node::add_child() [const, virtual]");
    }

    #[test]
    fn test_property_and_signal() {
        let property = PropertySpec {
            name: "name".into(),
            ty: "StringName".into(),
            setter: Some("set_name".into()),
            getter: Some("get_name".into()),
            index: None,
        };
        assert_eq!(
            property_signature(&property),
            "StringName name [get=get_name, set=set_name]"
        );
        let signal = SignalSpec {
            name: "child_entered_tree".into(),
            arguments: vec![param("node", "Node", None)],
        };
        assert_eq!(signal_signature(&signal), "signal child_entered_tree(Node node)");
    }

    #[test]
    fn test_operator_signature() {
        let binary = OperatorSpec {
            name: "+".into(),
            right_type: Some("Vector2".into()),
            return_type: "Vector2".into(),
        };
        let unary = OperatorSpec {
            name: "unary-".into(),
            right_type: None,
            return_type: "Vector2".into(),
        };
        assert_eq!(operator_signature("Vector2", &binary), "Vector2 + Vector2 -> Vector2");
        assert_eq!(operator_signature("Vector2", &unary), "unary- Vector2 -> Vector2");
    }
}
