//! Walks a value and fills it in: allocates nil containers, writes leaves,
//! and descends into nested structure.

use alloc::{boxed::Box, vec, vec::Vec};

use kiln_core::{Def, FieldError, Kind, Shape, Value};
#[cfg(feature = "log")]
use owo_colors::OwoColorize;

use crate::{
    ConventionViolation, Peek, Poke, PokeList, PokeMap, PokePointer, PokeStruct, ReflectError,
    debug, trace,
};

mod convention;
pub use convention::*;


/// Fills in values according to a [`Convention`].
///
/// Walking a value mutates it in place through the [`Poke`] it is given. When
/// the walk stops on a [`ReflectError::ConventionViolation`], whatever was
/// filled in so far stays filled in: the value should be considered unusable.
#[derive(Debug, Clone, Default)]
pub struct Materializer {
    convention: Convention,
}

/// What a read-only walk found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Survey {
    /// Values looked at, containers included
    pub visited: usize,
    /// Nil maps, lists and pointers
    pub nil: usize,
    /// Values of a kind the convention does not handle
    pub unsupported: usize,
}

impl Materializer {
    /// Creates a materializer following `convention`
    pub fn new(convention: Convention) -> Self {
        Self { convention }
    }

    /// The convention this materializer follows
    pub fn convention(&self) -> &Convention {
        &self.convention
    }

    /// Fills in the value behind `poke`, and everything reachable from it
    pub fn materialize(&self, poke: Poke<'_>) -> Result<(), ReflectError> {
        self.walk(poke, 0)
    }

    /// Resets the item at `index` to a fresh element: see
    /// [`Materializer::fresh_element`]
    pub fn replace_element(&self, list: &mut PokeList<'_>, index: usize) -> Result<(), ReflectError> {
        let fresh = Self::fresh_element(list.elem_shape());
        list.set(index, fresh)
    }

    /// A new list item of shape `elem`: the zero value, except that a pointer
    /// to a struct points at a zero struct
    pub fn fresh_element(elem: &'static Shape) -> Value {
        match elem.def {
            Def::Pointer(def) if elem.is_pointer_to_struct() => {
                Value::Pointer(Some(Box::new(Value::zero(def.target()))))
            }
            _ => Value::zero(elem),
        }
    }

    /// Walks the value behind `peek` without changing anything, counting what
    /// it finds
    pub fn survey(&self, peek: Peek<'_>) -> Result<Survey, ReflectError> {
        let mut survey = Survey::default();
        let mut stack: Vec<Peek<'_>> = vec![peek];

        while let Some(peek) = stack.pop() {
            let peek = peek.innermost();
            survey.visited += 1;

            let kind = peek.kind();
            if !self.convention.supported.includes(kind) {
                survey.unsupported += 1;
                continue;
            }
            if peek.is_nil() {
                survey.nil += 1;
                continue;
            }

            match kind {
                Kind::Map => {
                    let map = peek.into_map()?;
                    for (_, value) in map.iter() {
                        stack.push(value);
                    }
                }
                Kind::List => {
                    let list = peek.into_list()?;
                    // Push items in reverse order
                    stack.extend(list.iter().rev());
                }
                Kind::Struct => {
                    let st = peek.into_struct()?;
                    stack.extend(st.fields().rev().map(|(_, value)| value));
                }
                _ => {}
            }
        }

        Ok(survey)
    }

    fn walk(&self, poke: Poke<'_>, depth: usize) -> Result<(), ReflectError> {
        let mut poke = poke.innermost();
        let shape = poke.shape();
        if depth >= self.convention.max_depth {
            return Err(violation(
                shape,
                ConventionViolation::DepthExceeded {
                    max_depth: self.convention.max_depth,
                },
            ));
        }

        match poke.kind() {
            Kind::Unsupported(_) => {
                trace!("[{depth}] skipping {} ({})", shape.yellow(), poke.kind());
                Ok(())
            }
            kind if !self.convention.supported.includes(kind) => {
                trace!("[{depth}] {kind} is not supported, skipping {}", shape.yellow());
                Ok(())
            }
            Kind::Bool | Kind::Int | Kind::Uint | Kind::Float | Kind::Complex => {
                self.fill_scalar(&mut poke)?;
                trace!("[{depth}] {} ← {}", shape.blue(), poke.as_peek().green());
                Ok(())
            }
            Kind::String => {
                self.fill_text(&mut poke)?;
                trace!("[{depth}] {} ← {:?}", shape.blue(), poke.as_peek().green());
                Ok(())
            }
            Kind::Map => self.fill_map(poke.into_map()?, depth),
            Kind::List => self.fill_list(poke.into_list()?, depth),
            Kind::Pointer => self.fill_pointer(poke.into_pointer()?, depth),
            Kind::Struct => {
                let st = poke
                    .into_struct()
                    .map_err(|_| violation(shape, ConventionViolation::InvalidAggregate))?;
                self.fill_struct(st, depth)
            }
        }
    }

    fn fill_scalar(&self, poke: &mut Poke<'_>) -> Result<(), ReflectError> {
        let leaves = &self.convention.leaves;
        match poke.kind() {
            Kind::Bool => poke.set_bool(leaves.boolean),
            Kind::Int => poke.set_int(leaves.signed),
            Kind::Uint => poke.set_uint(leaves.unsigned),
            Kind::Float => poke.set_float(leaves.float),
            Kind::Complex => poke.set_complex(leaves.complex),
            _ => Ok(()),
        }
    }

    fn fill_text(&self, poke: &mut Poke<'_>) -> Result<(), ReflectError> {
        poke.set_str(self.convention.leaves.text)?;

        let text = poke.as_peek().into_str()?;
        let prefix_len = (0..=text.len().min(5))
            .rev()
            .find(|&i| text.as_str().is_char_boundary(i))
            .unwrap_or(0);
        #[cfg_attr(not(feature = "log"), allow(unused_variables))]
        let prefix = text.slice(0, prefix_len)?;
        #[cfg_attr(not(feature = "log"), allow(unused_variables))]
        let first = if text.is_empty() {
            None
        } else {
            Some(text.byte(0)?)
        };
        trace!(
            "{} has len {}, first byte {:?}, prefix {:?}",
            poke.shape().blue(),
            text.len(),
            first,
            prefix
        );
        Ok(())
    }

    fn fill_map(&self, mut map: PokeMap<'_>, depth: usize) -> Result<(), ReflectError> {
        let policy = &self.convention.map;
        let def = map.def();

        if map.is_nil() {
            debug!("[{depth}] allocating nil map {}", map.shape().blue());
            map.make(policy.initial_capacity);
        }

        #[cfg(feature = "log")]
        {
            trace!(
                "[{depth}] {} has {} entries, {} => {}",
                map.shape().blue(),
                map.len().yellow(),
                def.k().green(),
                def.v().green()
            );
            for (key, value) in map.as_peek().iter() {
                trace!("[{depth}]   {key:?} => {value:?}");
            }
        }

        if policy.seed_zero_entry {
            let key = Value::zero(def.k());
            if !map.contains_key(&key) {
                map.insert(key, Value::zero(def.v()))?;
            }
        }

        if def.k().kind() == Kind::String && def.v().kind() == Kind::String {
            for (key, value) in policy.text_entries {
                let key = Value::from(*key);
                if !map.contains_key(&key) {
                    map.insert(key, Value::from(*value))?;
                }
            }
        }

        if def.v().kind() == Kind::Struct || def.v().is_pointer_to_struct() {
            self.fill_map_values(&mut map, depth)?;
        }
        Ok(())
    }

    fn fill_map_values(&self, map: &mut PokeMap<'_>, depth: usize) -> Result<(), ReflectError> {
        let v = map.def().v();
        match self.convention.map.value_recursion {
            MapValueRecursion::Skip => {}
            MapValueRecursion::Inspect if v.is_pointer_to_struct() => {
                for target in map.pointees_mut() {
                    trace!("[{depth}] walking the {} behind a map value", target.shape().blue());
                    self.walk(target, depth + 1)?;
                }
            }
            MapValueRecursion::Inspect => {
                for (_, value) in map.as_peek().iter() {
                    #[cfg_attr(not(feature = "log"), allow(unused_variables))]
                    let survey = self.survey(value)?;
                    trace!("[{depth}] surveyed a {} map value: {survey:?}", v.blue());
                }
            }
            MapValueRecursion::WriteBack => {
                for key in map.keys() {
                    let Some(current) = map.get(&key) else {
                        continue;
                    };
                    let mut copy = current.value().clone();
                    self.walk(Poke::unchecked_new(&mut copy, v), depth + 1)?;
                    map.insert(key, copy)?;
                }
            }
        }
        Ok(())
    }

    fn fill_list(&self, mut list: PokeList<'_>, depth: usize) -> Result<(), ReflectError> {
        let policy = self.convention.list;
        let elem = list.elem_shape();

        if list.is_nil() {
            debug!(
                "[{depth}] allocating nil list {} with len {} and cap {}",
                list.shape().blue(),
                policy.initial_len,
                policy.initial_cap
            );
            list.make(policy.initial_len, policy.initial_cap)?;
        }

        #[cfg(feature = "log")]
        {
            let view = list.as_peek();
            trace!(
                "[{depth}] {} has len {} and cap {}",
                view.shape().blue(),
                view.len().yellow(),
                view.cap().yellow()
            );
            if let (Ok(head), Ok(bounded)) = (view.slice(0, 2), view.slice3(0, 2, 3)) {
                trace!(
                    "[{depth}] [0:2] has len {}, [0:2:3] has cap {}",
                    head.len(),
                    bounded.cap()
                );
            }
        }

        if elem.kind() == Kind::Struct || elem.is_pointer_to_struct() {
            for index in 0..list.len() {
                self.walk(list.get_mut(index)?, depth + 1)?;
            }
        }

        for _ in 0..policy.append_zeroed {
            list.push(Self::fresh_element(elem))?;
        }
        if policy.append_range > 0 {
            let fresh = (0..policy.append_range).map(|_| Self::fresh_element(elem));
            list.append(fresh)?;
        }
        Ok(())
    }

    fn fill_pointer(&self, pointer: PokePointer<'_>, depth: usize) -> Result<(), ReflectError> {
        let shape = pointer.shape();
        if !pointer.is_nil() {
            return Err(violation(shape, ConventionViolation::PointerNotNil));
        }

        let target = pointer.target_shape();
        let allocatable = match target.kind() {
            Kind::Unsupported(_) => true,
            kind => self.convention.pointer.allocatable.includes(kind),
        };
        if !allocatable {
            return Err(violation(
                shape,
                ConventionViolation::UnsupportedPointee { pointee: target },
            ));
        }

        debug!("[{depth}] allocating the pointee of {}", shape.blue());
        self.walk(pointer.allocate(), depth + 1)
    }

    fn fill_struct(&self, mut st: PokeStruct<'_>, depth: usize) -> Result<(), ReflectError> {
        let shape = st.shape();
        trace!(
            "[{depth}] {} has {} fields",
            shape.blue(),
            st.field_count().yellow()
        );

        let mut walked_first = false;
        for index in 0..st.field_count() {
            let field = st.field_meta(index).map_err(field_error(shape))?;
            trace!(
                "[{depth}]   .{} = {:?}",
                field.name.green(),
                st.peek_field(index).map_err(field_error(shape))?
            );
            if field.is_embedded() && !field.is_private() && field.shape().kind() == Kind::Struct {
                trace!("[{depth}] descending into embedded {}", field.name.green());
                self.walk(st.field(index).map_err(field_error(shape))?, depth + 1)?;
                walked_first |= index == 0;
            }
        }

        self.fill_first_field(&mut st, walked_first, depth)
    }

    fn fill_first_field(
        &self,
        st: &mut PokeStruct<'_>,
        walked: bool,
        depth: usize,
    ) -> Result<(), ReflectError> {
        let shape = st.shape();
        let Ok(first) = st.field_meta(0) else {
            return Ok(());
        };
        if first.is_private() {
            trace!("[{depth}] first field {} is private", first.name.yellow());
            return Ok(());
        }

        let rule = self.convention.first_field;
        let mut poke = st.field(0).map_err(field_error(shape))?;
        match poke.kind() {
            Kind::Int => match poke.set_int(rule.int_value) {
                Err(ReflectError::NumericOverflow { .. }) => {
                    debug!(
                        "[{depth}] {} does not fit in first field {}, leaving it",
                        rule.int_value,
                        first.name.yellow()
                    );
                    Ok(())
                }
                result => result,
            },
            Kind::Struct if !walked => self.walk(poke, depth + 1),
            Kind::Pointer if poke.is_nil() => {
                self.fill_first_pointer(poke.into_pointer()?)
            }
            _ => Ok(()),
        }
    }

    fn fill_first_pointer(&self, pointer: PokePointer<'_>) -> Result<(), ReflectError> {
        let rule = self.convention.first_field;
        let target = pointer.target_shape();
        let pointee = PointeeKinds::of(target);
        if pointee.is_empty() || !rule.pointees.contains(pointee) {
            trace!("leaving nil first field pointing to {}", target.yellow());
            return Ok(());
        }

        debug!("allocating first field pointee {}", target.blue());
        let poke = pointer.allocate();
        if pointee == PointeeKinds::BYTES {
            poke.into_list()?.make(0, rule.byte_buffer_capacity)?;
        } else if pointee == PointeeKinds::MAP {
            poke.into_map()?.make(self.convention.map.initial_capacity);
        }
        Ok(())
    }
}

fn violation(shape: &'static Shape, violation: ConventionViolation) -> ReflectError {
    ReflectError::ConventionViolation { shape, violation }
}

fn field_error(shape: &'static Shape) -> impl Fn(FieldError) -> ReflectError {
    move |field_error| ReflectError::FieldError { shape, field_error }
}
