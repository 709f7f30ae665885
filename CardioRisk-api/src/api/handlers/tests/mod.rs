mod assessment_test;
