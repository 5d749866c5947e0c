use kiln_core::{Field, Kind, MapStorage, Shape, StructDef, Value, shapes};
use kiln_reflect::{
    ConventionViolation, Convention, ListPolicy, Materializer, Peek, Poke, ReflectError,
};
use kiln_testhelpers::test;

static POINT: Shape = Shape::builder("Point")
    .struct_(
        StructDef::builder()
            .fields(&const {
                [
                    Field::builder().name("x").shape(|| &shapes::I64).build(),
                    Field::builder().name("y").shape(|| &shapes::I64).build(),
                ]
            })
            .build(),
    )
    .build();

static POINTS: Shape = Shape::builder("Vec<Point>").list(|| &POINT).build();

static INTS: Shape = Shape::builder("Vec<i64>").list(|| &shapes::I64).build();

static I64_PTR: Shape = Shape::builder("*i64").pointer(|| &shapes::I64).build();
static I64_PTR_PTR: Shape = Shape::builder("**i64").pointer(|| &I64_PTR).build();
static I64_PTR_PTR_PTR: Shape = Shape::builder("***i64").pointer(|| &I64_PTR_PTR).build();

static TABLE: Shape = Shape::builder("Map<String, String>")
    .map(|| &shapes::STRING, || &shapes::STRING)
    .build();

static TABLE_PTR: Shape = Shape::builder("*Map<String, String>")
    .pointer(|| &TABLE)
    .build();

static STRING_PTR: Shape = Shape::builder("*String").pointer(|| &shapes::STRING).build();

static NAMED: Shape = Shape::builder("Named")
    .struct_(
        StructDef::builder()
            .fields(&const { [Field::builder().name("Name").shape(|| &STRING_PTR).build()] })
            .build(),
    )
    .build();

static NAMED_PTR: Shape = Shape::builder("*Named").pointer(|| &NAMED).build();

static CONFIG: Shape = Shape::builder("Config")
    .struct_(
        StructDef::builder()
            .fields(&const {
                [
                    Field::builder().name("name").shape(|| &shapes::STRING).build(),
                    Field::builder().name("settings").shape(|| &TABLE_PTR).build(),
                ]
            })
            .build(),
    )
    .build();

static MIXED: Shape = Shape::builder("Mixed")
    .struct_(
        StructDef::builder()
            .fields(&const {
                [
                    Field::builder().name("id").shape(|| &shapes::U32).build(),
                    Field::builder().name("tags").shape(|| &INTS).build(),
                    Field::builder().name("owner").shape(|| &NAMED_PTR).build(),
                    Field::builder().name("origin").shape(|| &POINT).build(),
                ]
            })
            .build(),
    )
    .build();

fn deep_int(v: i64) -> Value {
    Value::Pointer(Some(Box::new(Value::Pointer(Some(Box::new(Value::Pointer(
        Some(Box::new(Value::Int(v))),
    )))))))
}

#[test]
fn pointer_chains_normalize_to_their_target() {
    let mut value = deep_int(3);
    let poke = Poke::new(&mut value, &I64_PTR_PTR_PTR)?;
    assert_eq!(poke.kind(), Kind::Pointer);

    let inner = poke.innermost();
    assert_eq!(inner.kind(), Kind::Int);
    assert!(inner.shape().is_shape(&shapes::I64));

    let peek = Peek::new(&value, &I64_PTR_PTR_PTR)?.innermost();
    assert_eq!(peek.as_i64()?, 3);
}

#[test]
fn pointer_chains_are_written_through() {
    let mut value = deep_int(3);
    Materializer::default().materialize(Poke::new(&mut value, &I64_PTR_PTR_PTR)?)?;
    assert_eq!(value, deep_int(64));
}

#[test]
fn nil_pointer_at_the_end_of_a_chain_is_allocated() {
    let mut value = Value::Pointer(Some(Box::new(Value::Pointer(None))));
    Materializer::default().materialize(Poke::new(&mut value, &I64_PTR_PTR)?)?;
    assert_eq!(
        value,
        Value::Pointer(Some(Box::new(Value::Pointer(Some(Box::new(Value::Int(64)))))))
    );
}

#[test]
fn initialized_map_keeps_its_entries_and_storage() {
    let mut storage = MapStorage::with_capacity(16);
    storage.insert("motd".into(), "welcome".into());
    let mut value = Value::Map(Some(storage));

    let materializer = Materializer::default();
    materializer.materialize(Poke::new(&mut value, &TABLE)?)?;
    materializer.materialize(Poke::new(&mut value, &TABLE)?)?;

    let Value::Map(Some(map)) = &value else {
        eyre::bail!("map should stay allocated: {value:?}");
    };
    assert_eq!(map.capacity(), 16);
    assert_eq!(map.len(), 4);
    assert_eq!(map.get(&"motd".into()), Some(&Value::from("welcome")));
    assert_eq!(map.get(&"greeting".into()), Some(&Value::from("hello")));
    assert_eq!(map.get(&"farewell".into()), Some(&Value::from("goodbye")));
    assert_eq!(map.get(&"".into()), Some(&Value::from("")));
}

#[test]
fn seeding_does_not_overwrite_existing_entries() {
    let mut storage = MapStorage::new();
    storage.insert("greeting".into(), "howdy".into());
    let mut value = Value::Map(Some(storage));

    Materializer::default().materialize(Poke::new(&mut value, &TABLE)?)?;

    let peek = Peek::new(&value, &TABLE)?.into_map()?;
    assert_eq!(peek.get(&"greeting".into()).map(|v| v.as_str()).transpose()?, Some("howdy"));
}

#[test]
fn nil_map_accepts_writes_after_materializing() {
    let mut value = Value::zero(&TABLE);
    assert!(value.is_nil());

    Materializer::default().materialize(Poke::new(&mut value, &TABLE)?)?;
    assert!(!value.is_nil());

    let mut map = Poke::new(&mut value, &TABLE)?.into_map()?;
    let before = map.len();
    assert_eq!(map.insert("lang".into(), "rust".into())?, None);
    assert_eq!(map.len(), before + 1);
    let keys: Vec<String> = map
        .iter()
        .map(|(k, _)| k.as_str().map(String::from))
        .collect::<Result<_, _>>()?;
    assert!(keys.iter().any(|k| k == "lang"));
}

#[test]
fn nil_list_gets_the_initial_len_and_cap() {
    let mut value = Value::zero(&INTS);
    Materializer::default().materialize(Poke::new(&mut value, &INTS)?)?;

    let list = Peek::new(&value, &INTS)?.into_list()?;
    assert_eq!((list.len(), list.cap()), (5, 8));

    let two = list.slice(0, 2)?;
    assert_eq!(two.len(), 2);
    assert_eq!(two.cap(), 8);

    let bounded = list.slice3(0, 2, 3)?;
    assert_eq!(bounded.len(), 2);
    assert_eq!(bounded.cap(), 3);

    assert!(matches!(
        list.slice3(0, 4, 3),
        Err(ReflectError::InvalidRange { .. })
    ));
}

#[test]
fn list_policy_is_configurable() {
    let convention = Convention::default().with_list(ListPolicy {
        initial_len: 1,
        initial_cap: 2,
        append_zeroed: 2,
        append_range: 3,
    });
    let mut value = Value::zero(&INTS);
    Materializer::new(convention).materialize(Poke::new(&mut value, &INTS)?)?;

    let list = Peek::new(&value, &INTS)?.into_list()?;
    assert_eq!(list.len(), 6);
    assert!(list.cap() >= 6);
    assert!(list.iter().all(|item| item.as_i64().is_ok_and(|v| v == 0)));
}

#[test]
fn zero_struct_has_every_declared_field() {
    for shape in [&POINT, &NAMED, &CONFIG, &MIXED] {
        let mut value = Value::zero(shape);
        let poke = Poke::new(&mut value, shape)?;
        assert!(!poke.is_nil());

        let st = poke.into_struct()?;
        let declared = shape.def.into_struct().map(|def| def.fields.len()).ok();
        assert_eq!(Some(st.field_count()), declared);
    }
}

#[test]
fn nil_pointer_to_struct_leaves_string_pointer_nil() {
    let mut value = Value::zero(&NAMED_PTR);
    Materializer::default().materialize(Poke::new(&mut value, &NAMED_PTR)?)?;

    assert_eq!(
        value,
        Value::Pointer(Some(Box::new(Value::Struct(vec![Value::Pointer(None)]))))
    );
}

#[test]
fn nil_struct_list_elements_are_independent() {
    let materializer = Materializer::default();
    let mut value = Value::zero(&POINTS);
    materializer.materialize(Poke::new(&mut value, &POINTS)?)?;

    let mut list = Poke::new(&mut value, &POINTS)?.into_list()?;
    assert_eq!((list.len(), list.cap()), (5, 8));

    let fresh = Value::Struct(vec![Value::Int(996), Value::Int(0)]);
    for item in list.as_peek().iter() {
        assert_eq!(item.value(), &fresh);
    }

    // Rewrite one element, then walk it again on its own
    list.get_mut(2)?.into_struct()?.field(1)?.set_int(-1)?;
    list.get_mut(2)?.into_struct()?.field(0)?.set_int(7)?;
    materializer.materialize(list.get_mut(2)?)?;

    let peek = list.as_peek();
    for (index, item) in peek.iter().enumerate() {
        if index == 2 {
            assert_eq!(
                item.value(),
                &Value::Struct(vec![Value::Int(996), Value::Int(-1)])
            );
        } else {
            assert_eq!(item.value(), &fresh);
        }
    }
}

#[test]
fn nil_pointer_to_map_field_is_a_convention_violation() {
    let mut value = Value::zero(&CONFIG);
    let mut config = Poke::new(&mut value, &CONFIG)?.into_struct()?;

    let err = Materializer::default()
        .materialize(config.field_by_name("settings")?)
        .unwrap_err();
    assert!(err.is_convention_violation());
    assert_eq!(
        err,
        ReflectError::ConventionViolation {
            shape: &TABLE_PTR,
            violation: ConventionViolation::UnsupportedPointee { pointee: &TABLE },
        }
    );
    assert!(config.peek_field(1)?.is_nil());
}

#[test]
fn struct_walk_only_touches_the_first_field() {
    let mut value = Value::zero(&CONFIG);
    Materializer::default().materialize(Poke::new(&mut value, &CONFIG)?)?;

    // `name` is a string, so the first-field rule has nothing to do, and the
    // nil map pointer in `settings` is never reached
    assert_eq!(value, Value::zero(&CONFIG));
}

#[test]
fn mixed_struct_round() {
    let mut value = Value::zero(&MIXED);
    let materializer = Materializer::default();

    let before = materializer.survey(Peek::new(&value, &MIXED)?)?;
    assert_eq!(before.nil, 2);

    materializer.materialize(Poke::new(&mut value, &MIXED)?)?;

    // `id` is unsigned, so the first-field rule does not apply
    assert_eq!(value, Value::zero(&MIXED));

    let mut mixed = Poke::new(&mut value, &MIXED)?.into_struct()?;
    for name in ["tags", "owner", "origin"] {
        materializer.materialize(mixed.field_by_name(name)?)?;
    }

    let peek = Peek::new(&value, &MIXED)?.into_struct()?;
    assert_eq!(peek.field_by_name("tags")?.into_list()?.len(), 5);
    assert_eq!(
        peek.field_by_name("owner")?.value(),
        &Value::Pointer(Some(Box::new(Value::Struct(vec![Value::Pointer(None)]))))
    );
    assert_eq!(
        peek.field_by_name("origin")?.value(),
        &Value::Struct(vec![Value::Int(996), Value::Int(0)])
    );

    let after = materializer.survey(Peek::new(&value, &MIXED)?)?;
    insta::assert_debug_snapshot!(after, @r"
    Survey {
        visited: 13,
        nil: 1,
        unsupported: 0,
    }
    ");
}
