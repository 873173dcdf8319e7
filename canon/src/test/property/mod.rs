mod one_hot_props;
