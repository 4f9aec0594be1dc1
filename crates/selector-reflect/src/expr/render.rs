//! Textual rendering of selector trees, in the host's expression notation.
//!
//! `c => c.Foo()`, `(c, txt, val) => c.Foo(txt, val)`, `() => Convert(Bar())`.
//! Error messages embed these renderings verbatim.

use std::fmt::{self, Display, Formatter};

use super::{Constant, Expr, Lambda, Member};

impl Display for Lambda {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.params.as_slice() {
            [single] => write!(f, "{}", single.name)?,
            params => {
                let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
                write!(f, "({})", names.join(", "))?;
            }
        }
        write!(f, " => {}", self.body)
    }
}

impl Display for Constant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Null(_)   => f.write_str("null"),
            Constant::Bool(b)   => f.write_str(if *b { "True" } else { "False" }),
            Constant::Int32(n)  => write!(f, "{n}"),
            Constant::Int64(n)  => write!(f, "{n}"),
            Constant::Double(n) => write!(f, "{n}"),
            Constant::Char(c)   => write!(f, "{c}"),
            Constant::String(s) => write!(f, "\"{s}\""),
            Constant::Type(t)   => write!(f, "{t}"),
            Constant::Method(m) => write!(f, "{m}"),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Parameter(p) => f.write_str(&p.name),
            Expr::Constant(c)  => write!(f, "{c}"),

            Expr::Call { target, method, args } => {
                if let Some(t) = target {
                    write!(f, "{t}.")?;
                }
                write!(f, "{}(", method.name)?;
                write_list(f, args)?;
                f.write_str(")")
            }

            Expr::MemberRead { target, member } => {
                match target {
                    Some(t) => write!(f, "{t}.")?,
                    None    => write!(f, "{}.", member.declaring_type())?,
                }
                f.write_str(member.name())
            }

            Expr::Convert { operand, .. } => write!(f, "Convert({operand})"),

            Expr::Assign { target, value } => write!(f, "({target} = {value})"),

            Expr::DelegateCreate { delegate_type, target, method } => {
                write!(f, "CreateDelegate({delegate_type}, ")?;
                match target {
                    Some(t) => write!(f, "{t}")?,
                    None    => f.write_str("null")?,
                }
                write!(f, ", {method})")
            }
        }
    }
}

impl Display for Member {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Member::Property(p) => write!(f, "{p}"),
            Member::Field(fd)   => write!(f, "{fd}"),
        }
    }
}

fn write_list(f: &mut Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::expr::{Constant, Expr, Lambda, Param};
    use crate::types::{MethodDescriptor, PropertyDescriptor, Type};

    fn owner() -> Type { Type::named("SomeClass") }

    fn bar() -> MethodDescriptor {
        MethodDescriptor::new(owner(), "Bar", vec![], Some(Type::int32())).make_static()
    }

    #[test]
    fn instance_call() {
        let c = Param::new("c", owner());
        let foo = MethodDescriptor::new(owner(), "Foo", vec![], Some(Type::int32()));
        let l = Lambda::new(vec![c.clone()], Expr::call(Expr::param(&c), foo, vec![]));
        assert_eq!(l.to_string(), "c => c.Foo()");
    }

    #[test]
    fn multiple_params() {
        let c   = Param::new("c", owner());
        let txt = Param::new("txt", Type::string());
        let val = Param::new("val", Type::int32());
        let foo = MethodDescriptor::new(owner(), "Foo", vec![Type::string(), Type::int32()], Some(Type::int32()));
        let body = Expr::call(Expr::param(&c), foo, vec![Expr::param(&txt), Expr::param(&val)]);
        let l = Lambda::new(vec![c, txt, val], body);
        assert_eq!(l.to_string(), "(c, txt, val) => c.Foo(txt, val)");
    }

    #[test]
    fn static_call_and_cast() {
        let l = Lambda::new(vec![], Expr::static_call(bar(), vec![]));
        assert_eq!(l.to_string(), "() => Bar()");

        let l = Lambda::new(vec![], Expr::cast(Expr::static_call(bar(), vec![]), Type::object()));
        assert_eq!(l.to_string(), "() => Convert(Bar())");
    }

    #[test]
    fn assignment_and_literals() {
        let c = Param::new("c", owner());
        let prop = PropertyDescriptor {
            declaring_type: owner(),
            name: "Prop".into(),
            ty: Type::string(),
            getter: None,
            setter: None,
        };
        let l = Lambda::new(
            vec![c.clone()],
            Expr::assign(Expr::property(Expr::param(&c), prop), Expr::constant(Constant::String("x".into()))),
        );
        assert_eq!(l.to_string(), "c => (c.Prop = \"x\")");
    }

    #[test]
    fn static_member_read_names_type() {
        let prop = PropertyDescriptor {
            declaring_type: owner(),
            name: "Instance".into(),
            ty: owner(),
            getter: None,
            setter: None,
        };
        let l = Lambda::new(vec![], Expr::static_property(prop));
        assert_eq!(l.to_string(), "() => SomeClass.Instance");
    }

    #[test]
    fn method_group() {
        let c = Param::new("c", owner());
        let foo = MethodDescriptor::new(owner(), "Foo", vec![], Some(Type::int32()));
        let l = Lambda::new(vec![c.clone()], Expr::method_group(Some(Expr::param(&c)), foo));
        assert_eq!(l.to_string(), "c => Convert(CreateDelegate(Func<Int32>, c, Int32 Foo()))");
    }
}
