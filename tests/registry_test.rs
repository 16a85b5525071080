use std::sync::Arc;

use pandrs_ops::error::{PandRSError, Result};
use pandrs_ops::ops::{
    build_flex_methods, build_inplace_methods, build_special_methods, check_flex_opt_out, install,
    lookup, ContainerKind, FlexMethod, InplaceTarget, MethodTable, OpOutput, Operand, OpsContainer,
    OpTable, Primitive,
};
use pandrs_ops::{DataFrame, Series};

/// A container type with no 1-D or 2-D capability
#[derive(Debug)]
struct Opaque;

fn noop(_: Primitive) -> FlexMethod<Opaque> {
    Arc::new(|_: &Opaque, _: Operand<'_>| -> Result<OpOutput<Opaque>> {
        Ok(OpOutput::Single(Opaque))
    })
}

impl OpsContainer for Opaque {
    const TYPE_NAME: &'static str = "Opaque";
    const KIND: Option<ContainerKind> = None;

    fn flex_arith_method(op: Primitive) -> FlexMethod<Self> {
        noop(op)
    }
    fn arith_method(op: Primitive) -> FlexMethod<Self> {
        noop(op)
    }
    fn comp_method(op: Primitive) -> FlexMethod<Self> {
        noop(op)
    }
    fn logical_method(op: Primitive) -> FlexMethod<Self> {
        noop(op)
    }
}

impl InplaceTarget for Opaque {
    fn reset_cacher(&mut self) {}
    fn reindex_like(self, _other: &Self) -> Result<Self> {
        Ok(self)
    }
    fn update_inplace(&mut self, _result: Self, _verify_is_copy: bool) -> Result<()> {
        Ok(())
    }
}

fn series_flex() -> MethodTable<Series> {
    build_flex_methods(&lookup::<Series>().unwrap()).unwrap()
}

fn frame_flex() -> MethodTable<DataFrame> {
    build_flex_methods(&lookup::<DataFrame>().unwrap()).unwrap()
}

#[test]
fn test_lookup_by_capability() {
    let series = lookup::<Series>().unwrap();
    assert_eq!(series.kind, ContainerKind::OneDimensional);
    assert!(series.is_unified());

    let frame = lookup::<DataFrame>().unwrap();
    assert_eq!(frame.kind, ContainerKind::TwoDimensional);
    assert!(!frame.is_unified());
}

#[test]
fn test_unrecognized_container_is_a_configuration_fault() {
    let err = lookup::<Opaque>().unwrap_err();
    assert!(matches!(err, PandRSError::UnrecognizedContainer("Opaque")));
    assert!(err.is_configuration_fault());

    // installation aborts as well
    assert!(install::<Opaque>().is_err());
}

#[test]
fn test_series_flex_table() {
    let table = series_flex();
    let expected = [
        "add", "radd", "sub", "rsub", "mul", "rmul", "truediv", "rtruediv", "floordiv",
        "rfloordiv", "mod", "rmod", "pow", "rpow", "divmod", "rdivmod", "eq", "ne", "lt", "gt",
        "le", "ge", "div", "rdiv", "multiply", "subtract", "divide",
    ];
    for name in expected.iter() {
        assert!(table.contains(name), "missing {}", name);
    }
    assert_eq!(table.len(), expected.len());
}

#[test]
fn test_frame_flex_table_has_no_divmod() {
    let table = frame_flex();
    assert!(!table.contains("divmod"));
    assert!(!table.contains("rdivmod"));
    assert_eq!(table.len(), 25);
}

#[test]
fn test_flex_tables_exclude_logical_and_reflected_comparisons() {
    let series = series_flex();
    let frame = frame_flex();
    for name in ["ror", "rand", "rxor", "and", "or", "xor", "and_", "req", "rne", "rlt"].iter() {
        assert!(!series.contains(name), "Series flex has {}", name);
        assert!(!frame.contains(name), "DataFrame flex has {}", name);
    }
}

#[test]
fn test_aliases_share_the_target_implementation() {
    let table = series_flex();
    let same = |alias: &str, target: &str| {
        Arc::ptr_eq(table.get(alias).unwrap(), table.get(target).unwrap())
    };
    assert!(same("div", "truediv"));
    assert!(same("divide", "truediv"));
    assert!(same("rdiv", "rtruediv"));
    assert!(same("multiply", "mul"));
    assert!(same("subtract", "sub"));
}

#[test]
fn test_opt_out_violation() {
    let mut table: OpTable<()> = OpTable::new();
    table.insert("add", ());
    assert!(check_flex_opt_out(&table, "Series").is_ok());

    table.insert("ror", ());
    let err = check_flex_opt_out(&table, "Series").unwrap_err();
    assert!(matches!(err, PandRSError::OptOutViolation(_)));
    assert!(err.is_configuration_fault());
}

#[test]
fn test_special_table() {
    let special = build_special_methods::<Series>();
    for name in [
        "__add__", "__radd__", "__divmod__", "__rdivmod__", "__eq__", "__and__", "__rand__",
        "__or__", "__ror__", "__xor__", "__rxor__",
    ]
    .iter()
    {
        assert!(special.contains(name), "missing {}", name);
    }
    assert!(!special.contains("__req__"));

    let frame_special = build_special_methods::<DataFrame>();
    assert!(!frame_special.contains("__divmod__"));
    assert!(frame_special.contains("__rxor__"));
}

#[test]
fn test_inplace_table_names() {
    let special = build_special_methods::<Series>();
    let inplace = build_inplace_methods(&special).unwrap();
    assert_eq!(
        inplace.names(),
        vec![
            "__iadd__",
            "__iand__",
            "__ifloordiv__",
            "__imod__",
            "__imul__",
            "__ior__",
            "__ipow__",
            "__isub__",
            "__itruediv__",
            "__ixor__",
        ]
    );
}

#[test]
fn test_inplace_requires_special_entries() {
    let empty: MethodTable<Series> = OpTable::new();
    let err = build_inplace_methods(&empty).unwrap_err();
    assert!(matches!(err, PandRSError::MissingMethod(_)));
}

#[test]
fn test_installed_surfaces() {
    let series = Series::ops();
    assert_eq!(series.type_name(), "Series");
    assert_eq!(series.len(), 28 + 27 + 10);
    assert!(series.contains("__iadd__"));
    assert!(series.get("__iadd__").unwrap().is_inplace());
    assert!(!series.get("add").unwrap().is_inplace());

    let frame = DataFrame::ops();
    assert_eq!(frame.len(), 26 + 25 + 10);

    let described = series.describe();
    assert_eq!(described.len(), series.len());
    let json = series.to_json().unwrap();
    assert!(json.contains("\"__ixor__\""));
}

#[test]
fn test_surface_call_errors() {
    let s = Series::new(vec![1i64], None).unwrap();
    let ops = Series::ops();

    assert!(matches!(
        ops.call("nope", &s, 1i64.into()),
        Err(PandRSError::MissingMethod(name)) if name == "Series.nope"
    ));
    assert!(matches!(
        ops.call("__iadd__", &s, 1i64.into()),
        Err(PandRSError::InvalidOperation(_))
    ));
}
