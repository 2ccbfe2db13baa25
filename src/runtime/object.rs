//! Concrete value kinds: numbers, strings, booleans, classes, instances

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::rc::{Rc, Weak};

use super::{Closure, Context, Executable, ObjectHolder};
use crate::error::{RuntimeError, RuntimeResult};

/// A runtime value.
pub enum Object {
    Number(i64),
    String(String),
    Bool(bool),
    Class(Rc<Class>),
    Instance(ClassInstance),
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Number(value) => f.debug_tuple("Number").field(value).finish(),
            Object::String(value) => f.debug_tuple("String").field(value).finish(),
            Object::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Object::Class(class) => f.debug_tuple("Class").field(&class.name).finish(),
            Object::Instance(instance) => f.debug_tuple("Instance").field(instance).finish(),
        }
    }
}

impl Object {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Object::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Object::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&Rc<Class>> {
        match self {
            Object::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&ClassInstance> {
        match self {
            Object::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Write the value to `out`. Instances with a `__str__` method print
    /// through it; the context is threaded into that call.
    pub fn print(&self, out: &mut dyn Write, ctx: &mut dyn Context) -> RuntimeResult<()> {
        match self {
            Object::Number(value) => write!(out, "{value}")?,
            Object::String(value) => write!(out, "{value}")?,
            Object::Bool(value) => write!(out, "{}", if *value { "True" } else { "False" })?,
            Object::Class(class) => write!(out, "Class {}", class.name())?,
            Object::Instance(instance) => instance.print(out, ctx)?,
        }
        Ok(())
    }
}

/// A named method: formal parameter names (the receiver is implicit) and an
/// executable body.
pub struct Method {
    pub name: String,
    pub formal_params: Vec<String>,
    pub body: Box<dyn Executable>,
}

/// A user class with single inheritance.
///
/// Inheritance is flattened at construction into a name-keyed resolution
/// table: parent methods are inserted first, own methods override them.
/// Lookup through a class always reaches the most derived override.
pub struct Class {
    name: String,
    methods: HashMap<String, Rc<Method>>,
    parent: Option<Rc<Class>>,
}

impl Class {
    pub fn new(
        name: impl Into<String>,
        methods: Vec<Method>,
        parent: Option<Rc<Class>>,
    ) -> Rc<Self> {
        let mut table = match &parent {
            Some(parent) => parent.methods.clone(),
            None => HashMap::new(),
        };
        for method in methods {
            table.insert(method.name.clone(), Rc::new(method));
        }
        Rc::new(Self {
            name: name.into(),
            methods: table,
            parent,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Rc<Class>> {
        self.parent.as_ref()
    }

    /// The most derived method with this name, if any.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name).map(Rc::as_ref)
    }
}

/// An instance of a user class: a class reference plus its own field
/// environment. Fields appear on first assignment; any name is admissible.
pub struct ClassInstance {
    class: Rc<Class>,
    fields: RefCell<Closure>,
    this: Weak<Object>,
}

impl fmt::Debug for ClassInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInstance")
            .field("class", &self.class.name)
            .finish_non_exhaustive()
    }
}

impl ClassInstance {
    /// Create an instance behind an owning handle.
    pub fn new(class: Rc<Class>) -> ObjectHolder {
        ObjectHolder::from_rc(Rc::new_cyclic(|this| {
            Object::Instance(ClassInstance {
                class,
                fields: RefCell::new(Closure::new()),
                this: Weak::clone(this),
            })
        }))
    }

    pub fn class(&self) -> &Rc<Class> {
        &self.class
    }

    pub fn fields(&self) -> Ref<'_, Closure> {
        self.fields.borrow()
    }

    pub fn fields_mut(&self) -> RefMut<'_, Closure> {
        self.fields.borrow_mut()
    }

    /// True when the class resolves `method` to a body expecting exactly
    /// `argument_count` actuals (receiver excluded).
    pub fn has_method(&self, method: &str, argument_count: usize) -> bool {
        self.class
            .method(method)
            .map_or(false, |found| found.formal_params.len() == argument_count)
    }

    /// Invoke `method` on this instance: `self` is bound as a non-owning
    /// view, formals are bound to actuals in order, and the body runs in
    /// that fresh environment.
    pub fn call(
        &self,
        method: &str,
        actual_args: &[ObjectHolder],
        ctx: &mut dyn Context,
    ) -> RuntimeResult<ObjectHolder> {
        let resolved = match self.class.method(method) {
            Some(found) if found.formal_params.len() == actual_args.len() => found,
            _ => {
                return Err(RuntimeError::UndefinedMethod {
                    method: method.to_string(),
                })
            }
        };
        let mut closure = Closure::new();
        closure.insert(
            "self".to_string(),
            ObjectHolder::from_weak(Weak::clone(&self.this)),
        );
        for (param, arg) in resolved.formal_params.iter().zip(actual_args) {
            closure.insert(param.clone(), arg.clone());
        }
        resolved.body.execute(&mut closure, ctx)
    }

    fn print(&self, out: &mut dyn Write, ctx: &mut dyn Context) -> RuntimeResult<()> {
        if self.has_method("__str__", 0) {
            let rendered = self.call("__str__", &[], ctx)?;
            rendered.object().print(out, ctx)
        } else {
            write!(out, "{:p}", self as *const ClassInstance)?;
            Ok(())
        }
    }
}
