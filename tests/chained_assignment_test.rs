// Options are process-wide, so everything that depends on them lives in one test.

use pandrs_ops::error::PandRSError;
use pandrs_ops::{get_options, set_options, ChainedAssignment, DataFrame, OpsConfigBuilder, Scalar, Series};

#[test]
fn test_chained_assignment_modes() {
    let previous = set_options(
        OpsConfigBuilder::new()
            .chained_assignment(ChainedAssignment::Raise)
            .build(),
    );
    assert_eq!(previous.chained_assignment, ChainedAssignment::Warn);
    assert_eq!(get_options().chained_assignment, ChainedAssignment::Raise);

    let parent = Series::new(vec![1i64, 2, 3], None).unwrap();
    let mut head = parent.head(2).unwrap();

    // ordinary mutators refuse to write into a derived copy
    let err = head.set(0, 100i64).unwrap_err();
    assert!(matches!(err, PandRSError::SettingWithCopy(_)));
    assert_eq!(head.get(0), Some(&Scalar::Int(1)));

    // the in-place adapter commits without the check
    head.iadd(1i64).unwrap();
    assert_eq!(head.values(), &[Scalar::Int(2), Scalar::Int(3)]);

    let mut df = DataFrame::new();
    df.add_column("a".to_string(), Series::new(vec![1i64, 2, 3], None).unwrap())
        .unwrap();
    let mut top = df.head(1).unwrap();
    let replacement = Series::new(vec![9i64], None).unwrap();
    assert!(matches!(
        top.set_column("a", &replacement),
        Err(PandRSError::SettingWithCopy(_))
    ));
    top.iadd(1i64).unwrap();
    assert_eq!(top.value(0, "a").unwrap(), Scalar::Int(2));

    // once the parent is gone the copy is independent
    drop(parent);
    assert!(!head.is_copy());
    head.set(0, 100i64).unwrap();

    // a copy that is written to is fine with the check switched off
    set_options(
        OpsConfigBuilder::new()
            .chained_assignment(ChainedAssignment::Off)
            .build(),
    );
    top.set_column("a", &replacement).unwrap();
    assert_eq!(top.value(0, "a").unwrap(), Scalar::Int(9));

    set_options(previous);
}
