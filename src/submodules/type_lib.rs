use ndarray::Array2;

pub type NumericData = f64;
pub type Field = Array2<NumericData>;
pub type Point = (NumericData, NumericData);

/// Min and max of a field, skipping NaN and infinities. `None` when nothing finite is left.
pub fn finite_range(field: &Field) -> Option<(NumericData, NumericData)> {
    field.iter()
        .filter(|value| value.is_finite())
        .fold(None, |acc, &value| match acc {
            None => Some((value, value)),
            Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
        })
}
