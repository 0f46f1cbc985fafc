//! Java-like rendering of descriptors for logs and error messages.

use std::fmt;

use crate::{TypeDescriptor, TypeRegistry};

/// Borrowing [`fmt::Display`] adapter returned by [`TypeDescriptor::display`].
pub struct DisplayDescriptor<'a> {
    env: &'a dyn TypeRegistry,
    ty: &'a TypeDescriptor,
}

impl TypeDescriptor {
    pub fn display<'a>(&'a self, env: &'a dyn TypeRegistry) -> DisplayDescriptor<'a> {
        DisplayDescriptor { env, ty: self }
    }

    /// The descriptor rendered as Java source syntax, e.g. `java.util.List<? extends T>`.
    pub fn type_name(&self, env: &dyn TypeRegistry) -> String {
        self.display(env).to_string()
    }
}

impl fmt::Display for DisplayDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_descriptor(f, self.env, self.ty)
    }
}

fn write_descriptor(
    f: &mut fmt::Formatter<'_>,
    env: &dyn TypeRegistry,
    ty: &TypeDescriptor,
) -> fmt::Result {
    match ty {
        TypeDescriptor::Raw(class) => match env.class(*class) {
            Some(def) => f.write_str(&def.name),
            None => write!(f, "<unknown class #{}>", class.to_raw()),
        },
        TypeDescriptor::Parameterized(p) => {
            let name = env.class(p.class).map(|def| def.name.as_str());
            match (&p.owner, name) {
                (Some(owner), Some(name)) => {
                    write_descriptor(f, env, owner)?;
                    let simple = name.rsplit(|c: char| c == '$' || c == '.').next().unwrap_or(name);
                    write!(f, ".{simple}")?;
                }
                (None, Some(name)) => f.write_str(name)?,
                (_, None) => write!(f, "<unknown class #{}>", p.class.to_raw())?,
            }
            f.write_str("<")?;
            write_list(f, env, &p.args, ", ")?;
            f.write_str(">")
        }
        TypeDescriptor::Wildcard(w) => {
            f.write_str("?")?;
            if !w.lower_bounds.is_empty() {
                f.write_str(" super ")?;
                write_list(f, env, &w.lower_bounds, " & ")?;
            } else if !w.upper_bounds.is_empty() {
                f.write_str(" extends ")?;
                write_list(f, env, &w.upper_bounds, " & ")?;
            }
            Ok(())
        }
        TypeDescriptor::TypeVar(id) => match env.type_param(*id) {
            Some(def) => f.write_str(&def.name),
            None => write!(f, "<unknown type variable #{}>", id.to_raw()),
        },
        TypeDescriptor::GenericArray(component) => {
            write_descriptor(f, env, component)?;
            f.write_str("[]")
        }
    }
}

fn write_list(
    f: &mut fmt::Formatter<'_>,
    env: &dyn TypeRegistry,
    items: &[TypeDescriptor],
    sep: &str,
) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }
        write_descriptor(f, env, item)?;
    }
    Ok(())
}
