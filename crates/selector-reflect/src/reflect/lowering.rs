//! Setter lowering.
//!
//! A setter selector `c => c.Prop = v` is rewritten into the call of the
//! property's set accessor, `c => c.set_Prop(v)`, so that it can go through
//! the ordinary call matcher and then the accessor resolver.

use std::borrow::Cow;

use tracing::trace;

use crate::expr::{Expr, Lambda, Member};

/// Rewrite an assignment to a writable property into the set-accessor call.
/// Any other selector comes back unchanged.
pub fn lower_setter(lambda: &Lambda) -> Cow<'_, Lambda> {
    let Expr::Assign { target, value } = &lambda.body else {
        return Cow::Borrowed(lambda);
    };
    let Expr::MemberRead { target: receiver, member: Member::Property(property) } = &**target else {
        return Cow::Borrowed(lambda);
    };
    let Some(setter) = &property.setter else {
        return Cow::Borrowed(lambda);
    };

    trace!(property = %property.name, setter = %setter, "lowering assignment to setter call");
    let body = Expr::Call {
        target: receiver.clone(),
        method: setter.clone(),
        args:   vec![(**value).clone()],
    };
    Cow::Owned(Lambda::new(lambda.params.clone(), body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Constant, Param};
    use crate::types::{FieldDescriptor, MethodDescriptor, PropertyDescriptor, Type, Visibility};

    fn owner() -> Type { Type::named("SomeClass") }

    fn setter_only() -> PropertyDescriptor {
        PropertyDescriptor {
            declaring_type: owner(),
            name: "SetterOnly".into(),
            ty: Type::int64(),
            getter: None,
            setter: Some(MethodDescriptor::new(owner(), "set_SetterOnly", vec![Type::int64()], None).special_name()),
        }
    }

    #[test]
    fn assignment_becomes_setter_call() {
        let c = Param::new("c", owner());
        let l = Lambda::new(
            vec![c.clone()],
            Expr::assign(Expr::property(Expr::param(&c), setter_only()), Expr::constant(Constant::Int64(0))),
        );
        let lowered = lower_setter(&l);
        assert!(matches!(lowered, Cow::Owned(_)));
        assert_eq!(lowered.to_string(), "c => c.set_SetterOnly(0)");
    }

    #[test]
    fn field_assignment_is_left_alone() {
        let c = Param::new("c", owner());
        let field = FieldDescriptor {
            declaring_type: owner(),
            name: "raw".into(),
            ty: Type::int32(),
            is_static: false,
            visibility: Visibility::Public,
        };
        let l = Lambda::new(
            vec![c.clone()],
            Expr::assign(Expr::field(Expr::param(&c), field), Expr::constant(Constant::Int32(1))),
        );
        assert!(matches!(lower_setter(&l), Cow::Borrowed(_)));
    }

    #[test]
    fn non_assignment_is_left_alone() {
        let l = Lambda::new(vec![], Expr::constant(Constant::Bool(true)));
        assert_eq!(lower_setter(&l).as_ref(), &l);
    }
}
