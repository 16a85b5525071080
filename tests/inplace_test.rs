use pandrs_ops::error::PandRSError;
use pandrs_ops::ops::registry::INPLACE_OPS;
use pandrs_ops::ops::{inplace_name, special_name};
use pandrs_ops::{DataFrame, RangeIndex, Scalar, Series};

fn ints(values: Vec<i64>) -> Series {
    Series::new(values, None).unwrap()
}

#[test]
fn test_iadd_returns_the_receiver() {
    let mut s = ints(vec![1, 2, 3]);
    let t = ints(vec![10, 20, 30]);
    let before: *const Series = &s;

    let returned = s.iadd(&t).unwrap();
    assert!(std::ptr::eq(returned as *const Series, before));

    assert_eq!(
        s.values(),
        &[Scalar::Int(11), Scalar::Int(22), Scalar::Int(33)]
    );
}

#[test]
fn test_iadd_scenario() {
    let mut x = ints(vec![1, 2, 3]);
    let y = ints(vec![1, 1, 1]);
    let before = x.clone();

    x.iadd(&y).unwrap();
    assert_eq!(x.values(), &[Scalar::Int(2), Scalar::Int(3), Scalar::Int(4)]);

    // same as computing out of place and realigning to the old labels
    let expected = before.add(&y).unwrap().reindex_like(&before);
    assert!(x.equals(&expected));
}

#[test]
fn test_inplace_matches_non_mutating_op() {
    let base = ints(vec![7, -7, 9]);
    let other = ints(vec![2, 2, -4]);

    let mut s = base.clone();
    s.ifloordiv(&other).unwrap();
    assert!(s.equals(&base.floordiv(&other).unwrap()));

    let mut s = base.clone();
    s.imod(&other).unwrap();
    assert!(s.equals(&base.modulo(&other).unwrap()));

    let mut s = base.clone();
    s.ipow(2i64).unwrap();
    assert!(s.equals(&base.pow(2i64).unwrap()));

    let mut s = base.clone();
    s.itruediv(2i64).unwrap();
    assert!(s.equals(&base.truediv(2i64).unwrap()));
}

#[test]
fn test_every_inplace_entry_matches_operator_then_realign() {
    let ops = Series::ops();
    let labels = |v: Vec<usize>| RangeIndex::new(v).unwrap();
    let ints_a = Series::with_index(vec![7i64, -3, 9], labels(vec![0, 1, 2]), None).unwrap();
    let ints_b = Series::with_index(vec![2i64, 4, 3], labels(vec![1, 2, 3]), None).unwrap();
    let bools_a = Series::with_index(vec![true, false, true], labels(vec![0, 1, 2]), None).unwrap();
    let bools_b = Series::with_index(vec![true, true, false], labels(vec![1, 2, 3]), None).unwrap();

    let mut covered = Vec::new();
    for op in INPLACE_OPS.iter() {
        let (a, b) = match *op {
            "and" | "or" | "xor" => (&bools_a, &bools_b),
            _ => (&ints_a, &ints_b),
        };
        let special = special_name(op);
        let expected = ops
            .call(&special, a, b.into())
            .unwrap()
            .into_single()
            .unwrap()
            .reindex_like(a);

        let mut x = a.clone();
        ops.call_inplace(&inplace_name(&special), &mut x, b.into()).unwrap();
        assert!(x.equals(&expected), "{} differs from {}", inplace_name(&special), special);
        assert_eq!(x.index().values(), a.index().values());
        covered.push(inplace_name(&special));
    }

    assert_eq!(covered.len(), 10);
    assert!(covered.contains(&"__iand__".to_string()));
    assert!(covered.contains(&"__ior__".to_string()));
}

#[test]
fn test_inplace_keeps_receiver_labels() {
    let mut s = Series::with_index(vec![1i64, 2, 3], RangeIndex::new(vec![0, 1, 2]).unwrap(), None)
        .unwrap();
    let t = Series::with_index(vec![10i64, 20], RangeIndex::new(vec![1, 5]).unwrap(), None)
        .unwrap();

    s.iadd(&t).unwrap();
    assert_eq!(s.index().values(), &[0, 1, 2]);
    assert_eq!(s.values(), &[Scalar::Null, Scalar::Int(12), Scalar::Null]);
}

#[test]
fn test_inplace_error_leaves_receiver_untouched() {
    let mut s = ints(vec![2, 3]);
    let err = s.ipow(-1i64).unwrap_err();
    assert!(matches!(err, PandRSError::ComputationError(_)));
    assert_eq!(s.values(), &[Scalar::Int(2), Scalar::Int(3)]);
}

#[test]
fn test_inplace_logical() {
    let mut flags = Series::new(vec![true, false, true], None).unwrap();
    let mask = Series::new(vec![true, true, false], None).unwrap();
    flags.ixor(&mask).unwrap();
    assert_eq!(
        flags.values(),
        &[Scalar::Bool(false), Scalar::Bool(true), Scalar::Bool(true)]
    );
}

#[test]
fn test_inplace_detaches_cached_column_view() {
    let mut df = DataFrame::new();
    df.add_column("a".to_string(), ints(vec![1, 2])).unwrap();
    df.add_column("b".to_string(), ints(vec![3, 4])).unwrap();

    let mut col = df.column("a").unwrap();
    let _other = df.column("b").unwrap();
    assert!(col.is_cached());
    assert_eq!(df.cached_columns(), vec!["a".to_string(), "b".to_string()]);

    col.iadd(1i64).unwrap();
    assert!(!col.is_cached());
    assert_eq!(df.cached_columns(), vec!["b".to_string()]);
    assert_eq!(col.values(), &[Scalar::Int(2), Scalar::Int(3)]);
    // the parent keeps its own storage
    assert_eq!(df.column_values("a").unwrap(), &[Scalar::Int(1), Scalar::Int(2)]);
}

#[test]
fn test_frame_inplace_clears_item_cache() {
    let mut df = DataFrame::new();
    df.add_column("a".to_string(), ints(vec![1, 2])).unwrap();
    let view = df.column("a").unwrap();
    assert!(view.is_cached());

    let before: *const DataFrame = &df;
    let returned = df.imul(10i64).unwrap();
    assert!(std::ptr::eq(returned as *const DataFrame, before));

    assert!(df.cached_columns().is_empty());
    assert!(!view.is_cached());
    assert_eq!(df.column_values("a").unwrap(), &[Scalar::Int(10), Scalar::Int(20)]);
}

#[test]
fn test_call_inplace_rejects_binary_entries() {
    let mut s = ints(vec![1]);
    let result = Series::ops().call_inplace("add", &mut s, 1i64.into());
    assert!(matches!(result, Err(PandRSError::InvalidOperation(_))));
}
