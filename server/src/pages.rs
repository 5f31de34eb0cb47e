//! Static page payloads. Copy lives here, not in handlers, so the route
//! surface stays readable.

use serde_json::{json, Value};

pub fn home() -> Value {
    json!({
        "name": "Telia Restaurant",
        "tagline": "Experience the authentic taste of Telangana cuisine with our traditional recipes and modern hospitality",
        "features": [
            { "title": "Authentic Flavors", "description": "Traditional Telangana recipes passed down through generations" },
            { "title": "Fresh Ingredients", "description": "Locally sourced, fresh ingredients prepared daily" },
            { "title": "Quick Service", "description": "Fast and efficient service without compromising quality" },
            { "title": "Home Delivery", "description": "Hot and fresh food delivered to your doorstep" },
        ],
        "signature_dishes": [
            { "name": "Chicken Dum Biryani", "description": "Aromatic basmati rice cooked with tender chicken and traditional spices", "price": 200.0 },
            { "name": "Mutton Rogan Josh", "description": "Slow-cooked mutton in rich aromatic gravy with traditional spices", "price": 250.0 },
            { "name": "Paneer Butter Masala", "description": "Cottage cheese simmered in a rich tomato and butter gravy", "price": 170.0 },
        ],
    })
}

pub fn about() -> Value {
    json!({
        "name": "Telia Restaurant",
        "story": "Born in Hyderabad, we cook the Telangana classics the way they have always been cooked, from slow-layered dum biryani to the fiery curries of the region.",
        "values": ["Authenticity", "Fresh ingredients", "Hygiene first", "Warm hospitality"],
        "mission": "Bring the authentic taste of Telangana to every table, delivered hot and made fresh every day.",
    })
}

pub fn contact() -> Value {
    json!({
        "address": ["123 Food Street, Banjara Hills", "Hyderabad, Telangana 500034"],
        "phone": ["+91 9876543210", "+91 9876543211"],
        "email": "info@teliarestaurant.com",
        "hours": { "days": "Monday - Sunday", "open": "11:00 AM - 11:00 PM" },
        "notes": "Free parking available | Family-friendly environment | Takeaway & Dine-in",
    })
}

pub fn menu_notes() -> Value {
    json!([
        "All prices are in Indian Rupees",
        "Prices may vary slightly based on market conditions",
        "Special dietary requirements can be accommodated on request",
        "Fresh ingredients used daily for the best taste and quality",
    ])
}
