use kiln_core::{
    Complex, Field, FieldError, FieldFlags, ListError, ListStorage, Shape, StructDef, Value,
    shapes,
};
use kiln_reflect::{Peek, Poke, ReflectError, raw};
use kiln_testhelpers::test;

static CREDENTIALS: Shape = Shape::builder("Credentials")
    .struct_(
        StructDef::builder()
            .fields(&const {
                [
                    Field::builder().name("user").shape(|| &shapes::STRING).build(),
                    Field::builder()
                        .name("token")
                        .shape(|| &shapes::STRING)
                        .flags(FieldFlags::PRIVATE.union(FieldFlags::SENSITIVE))
                        .build(),
                ]
            })
            .build(),
    )
    .build();

static SESSION: Shape = Shape::builder("Session")
    .struct_(
        StructDef::builder()
            .fields(&const {
                [
                    Field::builder().name("id").shape(|| &shapes::U64).build(),
                    Field::builder()
                        .name("credentials")
                        .shape(|| &CREDENTIALS)
                        .private()
                        .build(),
                ]
            })
            .build(),
    )
    .build();

static NUMBERS: Shape = Shape::builder("Numbers")
    .struct_(
        StructDef::builder()
            .fields(&const {
                [
                    Field::builder().name("small").shape(|| &shapes::I8).build(),
                    Field::builder().name("byte").shape(|| &shapes::U8).build(),
                    Field::builder().name("single").shape(|| &shapes::F32).build(),
                    Field::builder().name("wave").shape(|| &shapes::COMPLEX64).build(),
                ]
            })
            .build(),
    )
    .build();

static INTS: Shape = Shape::builder("Vec<i64>").list(|| &shapes::I64).build();

static TABLE: Shape = Shape::builder("Map<String, i64>")
    .map(|| &shapes::STRING, || &shapes::I64)
    .build();

static STRING_PTR: Shape = Shape::builder("*String").pointer(|| &shapes::STRING).build();

#[test]
fn poke_checks_conformance() {
    let mut value = Value::Int(1);
    assert_eq!(
        Poke::new(&mut value, &shapes::STRING).unwrap_err(),
        ReflectError::ValueMismatch {
            shape: &shapes::STRING
        }
    );

    let mut value = Value::Int(1000);
    assert!(Poke::new(&mut value, &shapes::I8).is_err());

    let value = Value::Str("hi".into());
    assert!(Peek::new(&value, &shapes::STRING).is_ok());
}

#[test]
fn scalar_setters_respect_the_width() {
    let mut value = Value::zero(&NUMBERS);
    let mut numbers = Poke::new(&mut value, &NUMBERS)?.into_struct()?;

    let mut small = numbers.field(0)?;
    small.set_int(-128)?;
    assert_eq!(
        small.set_int(128).unwrap_err(),
        ReflectError::NumericOverflow { shape: &shapes::I8 }
    );
    assert!(matches!(
        small.set_str("nope"),
        Err(ReflectError::WasNotA { .. })
    ));

    let mut byte = numbers.field(1)?;
    byte.set_uint(255)?;
    assert!(byte.set_uint(256).is_err());

    numbers.field(2)?.set_float(0.1)?;
    numbers.field(3)?.set_complex(Complex::new(0.1, -0.1))?;

    assert_eq!(
        value,
        Value::Struct(vec![
            Value::Int(-128),
            Value::Uint(255),
            Value::Float(0.1f32 as f64),
            Value::Complex(Complex::new(0.1f32 as f64, -0.1f32 as f64)),
        ])
    );
}

#[test]
fn private_fields_are_read_only() {
    let mut value = Value::Struct(vec!["alice".into(), "s3cr3t".into()]);
    let mut creds = Poke::new(&mut value, &CREDENTIALS)?.into_struct()?;

    assert_eq!(creds.field(1).unwrap_err(), FieldError::NotExported);
    assert_eq!(
        creds.field_by_name("token").unwrap_err(),
        FieldError::NotExported
    );
    assert_eq!(creds.field_by_name("nope").unwrap_err(), FieldError::NoSuchField);
    assert_eq!(creds.peek_field(1)?.as_str()?, "s3cr3t");

    let writable: Vec<(&str, bool)> = creds
        .fields_mut()
        .map(|(field, poke)| (field.name, poke.is_some()))
        .collect();
    assert_eq!(writable, [("user", true), ("token", false)]);

    creds.field(0)?.set_str("bob")?;
    assert_eq!(value, Value::Struct(vec!["bob".into(), "s3cr3t".into()]));
}

#[test]
fn peek_struct_reads_by_name() {
    let value = Value::Struct(vec![Value::Uint(9), Value::zero(&CREDENTIALS)]);
    let session = Peek::new(&value, &SESSION)?.into_struct()?;

    assert_eq!(session.field_count(), 2);
    assert_eq!(session.field_by_name("id")?.as_u64()?, 9);
    assert_eq!(session.field(2).unwrap_err(), FieldError::IndexOutOfBounds);

    let names: Vec<&str> = session.fields().map(|(field, _)| field.name).collect();
    assert_eq!(names, ["id", "credentials"]);
}

#[test]
fn peek_str_ranges() {
    let value = Value::Str("héllo".into());
    let text = Peek::new(&value, &shapes::STRING)?.into_str()?;

    assert_eq!(text.len(), 6);
    assert_eq!(text.byte(0)?, b'h');
    assert_eq!(text.slice(0, 3)?, "hé");
    assert!(text.slice(0, 2).is_err());
    assert!(text.byte(6).is_err());
}

#[test]
fn list_length_and_capacity() {
    let mut value = Value::zero(&INTS);
    let mut list = Poke::new(&mut value, &INTS)?.into_list()?;

    assert!(list.is_nil());
    list.set_len(0)?;
    list.set_cap(0)?;
    assert!(list.set_len(1).is_err());

    list.make(2, 4)?;
    assert_eq!((list.len(), list.cap()), (2, 4));
    list.set_len(4)?;
    assert_eq!(
        list.set_len(5).unwrap_err(),
        ReflectError::ListError {
            shape: &INTS,
            list_error: ListError::LenOutOfRange { len: 5, cap: 4 },
        }
    );

    list.set_len(1)?;
    list.set_cap(1)?;
    assert_eq!((list.len(), list.cap()), (1, 1));
    assert!(list.set_cap(2).is_err());

    list.set(0, Value::Int(5))?;
    assert!(matches!(
        list.set(1, Value::Int(5)),
        Err(ReflectError::IndexOutOfBounds { index: 1, len: 1, .. })
    ));
    assert!(list.push(Value::Str("x".into())).is_err());
    list.push(Value::Int(6))?;
    list.append([Value::Int(7), Value::Int(8)])?;

    let items: Vec<i64> = list
        .as_peek()
        .iter()
        .map(|item| item.as_i64())
        .collect::<Result<_, _>>()?;
    assert_eq!(items, [5, 6, 7, 8]);
}

#[test]
fn push_onto_a_nil_list_allocates_it() {
    let mut value = Value::zero(&INTS);
    Poke::new(&mut value, &INTS)?
        .into_list()?
        .push(Value::Int(1))?;

    let mut expected = ListStorage::new(&shapes::I64);
    expected.push(Value::Int(1));
    assert_eq!(value, Value::List(Some(expected)));
}

#[test]
fn slices_share_the_backing_store() {
    let mut value = Value::List(Some(ListStorage::with_len_cap(&shapes::I64, 3, 6)?));
    let mut list = Poke::new(&mut value, &INTS)?.into_list()?;
    for index in 0..3 {
        list.set(index, Value::Int(index as i64 * 10))?;
    }

    let peek = list.as_peek();
    let tail = peek.slice(1, 3)?;
    assert_eq!((tail.len(), tail.cap()), (2, 5));
    assert_eq!(tail.get(0).map(|item| item.as_i64()).transpose()?, Some(10));
    assert!(tail.get(2).is_none());

    let bounded = peek.slice3(1, 2, 4)?;
    assert_eq!((bounded.len(), bounded.cap()), (1, 3));
}

#[test]
fn map_handles() {
    let mut value = Value::zero(&TABLE);
    let mut map = Poke::new(&mut value, &TABLE)?.into_map()?;

    assert!(map.is_nil());
    assert_eq!(map.remove(&"a".into()), None);
    assert!(matches!(
        map.insert("a".into(), Value::Int(1)),
        Err(ReflectError::NilContainer {
            operation: "insert",
            ..
        })
    ));

    map.make(4);
    assert!(map.is_empty());
    assert_eq!(map.insert("a".into(), Value::Int(1))?, None);
    assert_eq!(map.insert("a".into(), Value::Int(2))?, Some(Value::Int(1)));
    assert!(map.insert(Value::Int(1), Value::Int(1)).is_err());
    assert!(map.insert("b".into(), "two".into()).is_err());

    assert_eq!(map.get(&"a".into()).map(|v| v.as_i64()).transpose()?, Some(2));
    assert_eq!(map.keys(), [Value::from("a")]);
    assert_eq!(map.remove(&"a".into()), Some(Value::Int(2)));
    assert_eq!(map.len(), 0);
}

#[test]
fn pointer_handles() {
    let mut value = Value::zero(&STRING_PTR);

    let pointer = Poke::new(&mut value, &STRING_PTR)?.into_pointer()?;
    assert!(pointer.is_nil());
    assert!(pointer.as_peek().target().is_none());
    assert!(pointer.into_target().is_none());

    let mut target = Poke::new(&mut value, &STRING_PTR)?
        .into_pointer()?
        .allocate();
    target.set_str("here")?;
    assert_eq!(
        Peek::new(&value, &STRING_PTR)?.innermost().as_str()?,
        "here"
    );

    let mut pointer = Poke::new(&mut value, &STRING_PTR)?.into_pointer()?;
    assert!(pointer.set_target(Value::Int(1)).is_err());
    pointer.set_target("there".into())?;
    assert!(!pointer.is_nil());
    pointer.set_nil();
    assert!(value.is_nil());
}

#[test]
fn conversions_name_the_expected_kind() {
    let mut value = Value::Int(0);
    let err = Poke::new(&mut value, &shapes::I64)?.into_list().unwrap_err();
    assert_eq!(
        err,
        ReflectError::WasNotA {
            expected: "list",
            actual: &shapes::I64
        }
    );
    assert!(!err.is_convention_violation());
}

#[test]
fn raw_writes_reach_private_fields() {
    let path = raw::FieldPath::resolve(&SESSION, &["credentials", "token"])?;
    assert_eq!(path.indices(), [1, 1]);
    assert!(path.leaf().is_shape(&shapes::STRING));
    assert!(path.root().is_shape(&SESSION));

    let mut value = Value::zero(&SESSION);
    raw::write_field(Poke::new(&mut value, &SESSION)?, &path, "t0k3n".into())?;

    let session = Peek::new(&value, &SESSION)?.into_struct()?;
    let creds = session.field_by_name("credentials")?.into_struct()?;
    assert_eq!(creds.field_by_name("token")?.as_str()?, "t0k3n");

    // Still type-checked at the leaf
    assert!(matches!(
        raw::write_field(Poke::new(&mut value, &SESSION)?, &path, Value::Int(1)),
        Err(ReflectError::ValueMismatch { .. })
    ));
}

#[test]
fn raw_paths_are_checked() {
    assert!(matches!(
        raw::FieldPath::resolve(&SESSION, &["id", "deeper"]),
        Err(ReflectError::WasNotA {
            expected: "struct",
            ..
        })
    ));
    assert!(matches!(
        raw::FieldPath::resolve(&SESSION, &["missing"]),
        Err(ReflectError::FieldError {
            field_error: FieldError::NoSuchField,
            ..
        })
    ));

    let path = raw::FieldPath::resolve(&CREDENTIALS, &["token"])?;
    let mut value = Value::zero(&SESSION);
    assert!(matches!(
        raw::write_field(Poke::new(&mut value, &SESSION)?, &path, "x".into()),
        Err(ReflectError::WrongShape { .. })
    ));
}
