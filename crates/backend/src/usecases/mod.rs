pub mod u101_predict_disease;
