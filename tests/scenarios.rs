use boxmetrics::{
    match_image, AnnotationSet, BBox, ConfusionMatrix, EvalConfig, Evaluator, Metric, MetricSet,
    Strategy, Threshold,
};

fn bbox(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> BBox {
    BBox::ltrb(xmin, ymin, xmax, ymax).unwrap()
}

fn one_image(gt: Vec<BBox>, pr: Vec<BBox>) -> (AnnotationSet, AnnotationSet) {
    (
        [("img".to_string(), gt)].into_iter().collect(),
        [("img".to_string(), pr)].into_iter().collect(),
    )
}

fn config(percent: i64) -> EvalConfig {
    EvalConfig::default().with_threshold(Threshold::from_percent(percent).unwrap())
}

#[test]
fn identical_boxes_at_full_threshold() {
    let b = bbox(0, 0, 10, 10);
    let (gt, pr) = one_image(vec![b], vec![b]);
    let eval = Evaluator::new(config(100)).evaluate(&gt, &pr).unwrap();

    assert_eq!(eval.images["img"].tp, vec![(b, b)]);
    assert!(eval.images["img"].fp.is_empty());
    assert!(eval.images["img"].fn_.is_empty());
    assert_eq!(eval.matrix, ConfusionMatrix::new(1, 0, 0));
    assert_eq!(eval.matrix.tn(), 0);
    assert_eq!(eval.metrics.acc, Metric::Defined(1.0));
    assert_eq!(eval.metrics.tpr, Metric::Defined(1.0));
    assert_eq!(eval.metrics.fpr, Metric::Undefined);
}

#[test]
fn quarter_overlap_below_half_threshold() {
    let g = bbox(0, 0, 10, 10);
    let p = bbox(5, 5, 15, 15);
    let (gt, pr) = one_image(vec![g], vec![p]);
    let eval = Evaluator::new(config(50)).evaluate(&gt, &pr).unwrap();

    assert_eq!(eval.images["img"].fn_, vec![g]);
    assert_eq!(eval.images["img"].fp, vec![p]);
    assert_eq!(eval.matrix, ConfusionMatrix::new(0, 1, 1));
    assert_eq!(eval.metrics.tpr, Metric::Defined(0.0));
    assert_eq!(eval.metrics.fpr, Metric::Defined(1.0));

    // 25% is admitted at exactly 25
    let eval = Evaluator::new(config(25)).evaluate(&gt, &pr).unwrap();
    assert_eq!(eval.matrix, ConfusionMatrix::new(1, 0, 0));
}

#[test]
fn prediction_goes_to_first_qualifying_ground_truth() {
    let g1 = bbox(0, 0, 10, 10);
    let g2 = bbox(1, 1, 9, 9);
    let p = bbox(0, 0, 10, 10);
    let (gt, pr) = one_image(vec![g1, g2], vec![p]);
    let eval = Evaluator::new(config(80)).evaluate(&gt, &pr).unwrap();

    assert_eq!(eval.images["img"].tp, vec![(g1, p)]);
    assert_eq!(eval.images["img"].fn_, vec![g2]);
    assert_eq!(eval.matrix, ConfusionMatrix::new(1, 0, 1));

    let optimal = Evaluator::new(config(80).with_strategy(Strategy::Optimal))
        .evaluate(&gt, &pr)
        .unwrap();
    assert_eq!(optimal.matrix, eval.matrix);
}

#[test]
fn no_ground_truth_leaves_tpr_undefined() {
    let (gt, pr) = one_image(vec![], vec![bbox(0, 0, 4, 4)]);
    let eval = Evaluator::default().evaluate(&gt, &pr).unwrap();

    assert_eq!(eval.matrix, ConfusionMatrix::new(0, 1, 0));
    assert_eq!(eval.metrics.tpr, Metric::Undefined);
    assert!(MetricSet::from(&ConfusionMatrix::default()) == eval_empty());
}

fn eval_empty() -> MetricSet {
    Evaluator::default()
        .evaluate(&AnnotationSet::new(), &AnnotationSet::new())
        .unwrap()
        .metrics
}

#[test]
fn swapping_roles_changes_the_outcome() {
    let small = bbox(0, 0, 10, 10);
    let large = bbox(0, 0, 20, 20);
    let t = Threshold::from_percent(50).unwrap();

    assert_eq!(match_image(&[small], &[large], t, Strategy::Greedy).tp.len(), 1);
    assert_eq!(match_image(&[large], &[small], t, Strategy::Greedy).tp.len(), 0);
}

#[test]
fn aggregation_over_many_images() {
    let a = bbox(0, 0, 10, 10);
    let b = bbox(50, 50, 60, 60);

    let gt: AnnotationSet = [
        ("1".to_string(), vec![a, b]),
        ("2".to_string(), vec![a]),
        ("3".to_string(), vec![]),
    ]
    .into_iter()
    .collect();
    let pr: AnnotationSet = [
        ("3".to_string(), vec![a]),
        ("2".to_string(), vec![b]),
        ("1".to_string(), vec![a]),
    ]
    .into_iter()
    .collect();

    let eval = Evaluator::default().evaluate(&gt, &pr).unwrap();

    assert_eq!(eval.matrix, ConfusionMatrix::new(1, 2, 2));
    let per_image: Vec<_> = eval.per_image().collect();
    assert_eq!(
        per_image,
        vec![
            ("1", ConfusionMatrix::new(1, 0, 1)),
            ("2", ConfusionMatrix::new(0, 1, 1)),
            ("3", ConfusionMatrix::new(0, 1, 0)),
        ]
    );
    assert_eq!(eval.metrics.acc, Metric::Defined(0.2));
}
