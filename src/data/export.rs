use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use arrow::util::pretty::pretty_format_batches;

use super::model::{AlgorithmData, Frame, Value};

// ---------------------------------------------------------------------------
// Frame → Arrow
// ---------------------------------------------------------------------------

impl Frame {
    /// Convert into an Arrow record batch for the graph renderer.
    ///
    /// Column types follow the cells: all integers → `Int64`, any mix of
    /// numbers → `Float64`, all booleans → `Boolean`, anything else → `Utf8`.
    /// `Null` cells become null slots; every field is nullable.
    pub fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        let mut fields = Vec::with_capacity(self.num_columns());
        let mut arrays = Vec::with_capacity(self.num_columns());

        for col in self.columns() {
            let array = column_array(&col.values);
            fields.push(Field::new(&col.name, array.data_type().clone(), true));
            arrays.push(array);
        }

        let options = RecordBatchOptions::new().with_row_count(Some(self.num_rows()));
        RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), arrays, &options)
    }
}

fn column_array(values: &[Value]) -> ArrayRef {
    let non_null = || values.iter().filter(|v| !matches!(v, Value::Null));

    if non_null().all(|v| matches!(v, Value::Integer(_))) {
        let ints: Vec<Option<i64>> = values
            .iter()
            .map(|v| match v {
                Value::Integer(i) => Some(*i),
                _ => None,
            })
            .collect();
        Arc::new(Int64Array::from(ints))
    } else if non_null().all(|v| v.as_f64().is_some()) {
        let floats: Vec<Option<f64>> = values.iter().map(Value::as_f64).collect();
        Arc::new(Float64Array::from(floats))
    } else if non_null().all(|v| matches!(v, Value::Bool(_))) {
        let bools: Vec<Option<bool>> = values
            .iter()
            .map(|v| match v {
                Value::Bool(b) => Some(*b),
                _ => None,
            })
            .collect();
        Arc::new(BooleanArray::from(bools))
    } else {
        let strings: Vec<Option<String>> = values
            .iter()
            .map(|v| match v {
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect();
        Arc::new(StringArray::from(strings))
    }
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// Render every algorithm's tables as ASCII grids, one block per source table.
pub fn render_pretty(data: &AlgorithmData) -> Result<String, ArrowError> {
    let mut out = String::new();
    for (algorithm, frames) in data {
        out.push_str(&format!("== {algorithm} ({} tables) ==\n", frames.len()));
        for frame in frames {
            let batch = frame.to_record_batch()?;
            out.push_str(&format!("{}\n", pretty_format_batches(&[batch])?));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;
    use arrow::datatypes::DataType;

    fn sample() -> Frame {
        let mut frame = Frame::from_columns(vec![
            Column::new("cells", vec![Value::Integer(10), Value::Integer(20)]),
            Column::new("bytes", vec![Value::Integer(512), Value::Null]),
            Column::new("ratio", vec![Value::Integer(1), Value::Float(0.5)]),
        ])
        .unwrap();
        frame.set_scalar("retrieval_ns", Value::Float(15.0));
        frame.set_scalar("source", Value::from("open_ai"));
        frame
    }

    #[test]
    fn record_batch_types_follow_cells() {
        let batch = sample().to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 2);

        let schema = batch.schema();
        let types: Vec<_> = schema.fields().iter().map(|f| f.data_type().clone()).collect();
        assert_eq!(
            types,
            [
                DataType::Int64,
                DataType::Int64,
                DataType::Float64,
                DataType::Float64,
                DataType::Utf8
            ]
        );

        let bytes = batch.column(1).as_any().downcast_ref::<Int64Array>().unwrap();
        assert!(bytes.is_null(1));

        let source = batch.column(4).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(source.value(0), "open_ai");
    }

    #[test]
    fn empty_frame_converts() {
        let batch = Frame::default().to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 0);
    }

    #[test]
    fn pretty_output_names_algorithms() {
        let mut data = AlgorithmData::new();
        data.insert("ns".to_string(), vec![sample()]);

        let text = render_pretty(&data).unwrap();
        assert!(text.starts_with("== ns (1 tables) =="));
        assert!(text.contains("retrieval_ns"));
        assert!(text.contains("open_ai"));
    }
}
